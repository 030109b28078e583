use std::fmt;

use serde::Serialize;

use crate::geometry::{Rect, Vec2};
use crate::inventory::InventoryStore;
use crate::objects::{ClickableObject, GameObject};
use crate::registry::SceneRegistry;
use crate::text_window::TextWindow;

mod draw;
mod interaction;
mod movement;

pub use draw::{DialogProgress, DrawData, DrawItem, InventoryDraw, ObjectDraw, PlayerDraw};
pub use interaction::ClickOutcome;
pub use movement::Facing;

pub const DEFAULT_INTERACT_DISTANCE: f32 = 28.0;
pub const DEFAULT_ANIMATION_SPEED: u32 = 4;
pub const ANIMATION_FRAME_COUNT: u32 = 5;
pub const DEFAULT_PLAYER_SPRITE_BASE: &str = "sprites/bahtiyar";
pub const HINT_TEXT: &str = "E төймәсенә басыгыз";
pub const INTERIOR_SCENE_SUFFIX: &str = "_house";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SceneKey(&'static str);

impl SceneKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }

    /// Interior scenes are recognised by their `_house` suffix.
    pub fn is_interior(self) -> bool {
        self.0.ends_with(INTERIOR_SCENE_SUFFIX)
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Outcome of an interaction: either the current scene stays active or the
/// driver must swap in the returned scene.
#[derive(Debug)]
pub enum SceneTransition {
    Stay,
    TransitionTo(Box<Scene>),
}

impl SceneTransition {
    pub fn is_stay(&self) -> bool {
        matches!(self, Self::Stay)
    }

    pub fn into_scene(self) -> Option<Scene> {
        match self {
            Self::Stay => None,
            Self::TransitionTo(scene) => Some(*scene),
        }
    }
}

/// Collaborators a scene needs while handling commands.
pub struct SceneContext<'a> {
    pub registry: &'a mut SceneRegistry,
    pub inventory: &'a mut dyn InventoryStore,
}

impl<'a> SceneContext<'a> {
    pub fn new(registry: &'a mut SceneRegistry, inventory: &'a mut dyn InventoryStore) -> Self {
        Self {
            registry,
            inventory,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    key: SceneKey,
    objects: Vec<GameObject>,
    clickables: Vec<ClickableObject>,
    player_position: Vec2,
    player_size: Vec2,
    player_sprite_base: String,
    player_texture_path: String,
    player_z: i32,
    scale_player_texture_to_rect: bool,
    animation_speed: u32,
    animation_tick: u32,
    animation_frame: u32,
    text_window: TextWindow,
    interact_distance: f32,
    inventory_open: bool,
    active_dialog_npc: Option<String>,
    return_position: Option<Vec2>,
}

impl Scene {
    pub fn new(key: SceneKey, player_position: Vec2, player_size: Vec2) -> Self {
        Self {
            key,
            objects: Vec::new(),
            clickables: Vec::new(),
            player_position,
            player_size,
            player_sprite_base: DEFAULT_PLAYER_SPRITE_BASE.to_string(),
            player_texture_path: format!("{DEFAULT_PLAYER_SPRITE_BASE}/down0.png"),
            player_z: 1,
            scale_player_texture_to_rect: true,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            animation_tick: 0,
            animation_frame: 0,
            text_window: TextWindow::default(),
            interact_distance: DEFAULT_INTERACT_DISTANCE,
            inventory_open: false,
            active_dialog_npc: None,
            return_position: None,
        }
    }

    pub fn with_objects(mut self, objects: impl IntoIterator<Item = GameObject>) -> Self {
        self.objects.extend(objects);
        self
    }

    pub fn with_object(mut self, object: GameObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn with_clickable(mut self, clickable: ClickableObject) -> Self {
        self.clickables.push(clickable);
        self
    }

    pub fn with_interact_distance(mut self, distance: f32) -> Self {
        self.interact_distance = if distance.is_finite() {
            distance.max(0.0)
        } else {
            0.0
        };
        self
    }

    pub fn with_player_sprite_base(mut self, base: impl Into<String>) -> Self {
        self.player_sprite_base = base.into();
        self.player_texture_path = format!("{}/down0.png", self.player_sprite_base);
        self
    }

    pub fn with_player_z(mut self, z: i32) -> Self {
        self.player_z = z;
        self
    }

    pub fn with_scaled_player_texture(mut self, scale: bool) -> Self {
        self.scale_player_texture_to_rect = scale;
        self
    }

    pub fn with_animation_speed(mut self, speed: u32) -> Self {
        self.animation_speed = speed.max(1);
        self
    }

    pub fn key(&self) -> SceneKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.as_str()
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn clickables(&self) -> &[ClickableObject] {
        &self.clickables
    }

    pub fn find_object(&self, id: &str) -> Option<&GameObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn find_object_mut(&mut self, id: &str) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    /// Removes an object; an open dialog with it is torn down on the next interaction.
    pub fn remove_object(&mut self, id: &str) -> Option<GameObject> {
        let index = self.objects.iter().position(|object| object.id == id)?;
        Some(self.objects.remove(index))
    }

    pub fn player_position(&self) -> Vec2 {
        self.player_position
    }

    pub fn set_player_position(&mut self, position: Vec2) {
        self.player_position = position;
    }

    pub fn player_size(&self) -> Vec2 {
        self.player_size
    }

    pub fn player_rect(&self) -> Rect {
        Rect::from_origin_size(self.player_position, self.player_size)
    }

    pub fn player_texture_path(&self) -> &str {
        &self.player_texture_path
    }

    pub fn animation_frame(&self) -> u32 {
        self.animation_frame
    }

    pub fn text_window(&self) -> &TextWindow {
        &self.text_window
    }

    pub fn interact_distance(&self) -> f32 {
        self.interact_distance
    }

    pub fn inventory_open(&self) -> bool {
        self.inventory_open
    }

    pub fn active_dialog_npc(&self) -> Option<&str> {
        self.active_dialog_npc.as_deref()
    }

    pub fn in_dialog(&self) -> bool {
        self.active_dialog_npc.is_some()
    }

    pub fn return_position(&self) -> Option<Vec2> {
        self.return_position
    }
}

#[cfg(test)]
mod tests;
