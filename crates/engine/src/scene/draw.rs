use std::cmp::Ordering;

use serde::Serialize;

use super::{Scene, SceneKey};
use crate::geometry::Rect;
use crate::inventory::{InventoryItem, InventoryStore};
use crate::objects::ObjectVariant;
use crate::text_window::TextWindow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDraw {
    pub rect: Rect,
    pub texture_path: String,
    pub z: i32,
    pub scale_texture_to_rect: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DialogProgress {
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectDraw {
    pub id: String,
    pub name: Option<String>,
    pub rect: Rect,
    pub solid: bool,
    pub interactable: bool,
    pub variant: ObjectVariant,
    pub texture_path: Option<String>,
    pub z: i32,
    pub scale_texture_to_rect: bool,
    pub dialog: Option<DialogProgress>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryDraw {
    pub open: bool,
    pub items: Vec<InventoryItem>,
}

/// Render-ready snapshot of one scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawData {
    pub scene: SceneKey,
    pub player: PlayerDraw,
    pub objects: Vec<ObjectDraw>,
    pub ui: TextWindow,
    pub inventory: InventoryDraw,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawItem<'a> {
    Player(&'a PlayerDraw),
    Object(&'a ObjectDraw),
}

impl DrawItem<'_> {
    fn z(&self) -> i32 {
        match self {
            Self::Player(player) => player.z,
            Self::Object(object) => object.z,
        }
    }

    fn rect(&self) -> Rect {
        match self {
            Self::Player(player) => player.rect,
            Self::Object(object) => object.rect,
        }
    }
}

fn draw_cmp(z_a: i32, rect_a: &Rect, z_b: i32, rect_b: &Rect) -> Ordering {
    z_a.cmp(&z_b).then_with(|| rect_a.y2.total_cmp(&rect_b.y2))
}

impl DrawData {
    /// Player and objects back to front: by `z`, then by bottom edge.
    pub fn draw_order(&self) -> Vec<DrawItem<'_>> {
        let mut items: Vec<DrawItem<'_>> = self.objects.iter().map(DrawItem::Object).collect();
        items.push(DrawItem::Player(&self.player));
        items.sort_by(|a, b| draw_cmp(a.z(), &a.rect(), b.z(), &b.rect()));
        items
    }
}

impl Scene {
    pub fn draw_data(&self, store: &dyn InventoryStore) -> DrawData {
        let mut objects: Vec<ObjectDraw> = self
            .objects
            .iter()
            .map(|object| ObjectDraw {
                id: object.id.clone(),
                name: object.name.clone(),
                rect: object.rect,
                solid: object.solid,
                interactable: object.interactable,
                variant: object.variant(),
                texture_path: object.texture_path.clone(),
                z: object.z,
                scale_texture_to_rect: object.scale_texture_to_rect,
                dialog: object.dialog().map(|dialog| DialogProgress {
                    current: dialog.cursor(),
                    total: dialog.line_count(),
                }),
            })
            .chain(self.clickables.iter().map(|clickable| ObjectDraw {
                id: clickable.id.clone(),
                name: Some(clickable.reward.word.clone()),
                rect: clickable.rect,
                solid: false,
                interactable: false,
                variant: ObjectVariant::Clickable,
                texture_path: Some(clickable.reward.texture_path.clone()),
                z: clickable.z,
                scale_texture_to_rect: true,
                dialog: None,
            }))
            .collect();
        objects.sort_by(|a, b| draw_cmp(a.z, &a.rect, b.z, &b.rect));

        DrawData {
            scene: self.key,
            player: PlayerDraw {
                rect: self.player_rect(),
                texture_path: self.player_texture_path.clone(),
                z: self.player_z,
                scale_texture_to_rect: self.scale_player_texture_to_rect,
            },
            objects,
            ui: self.text_window.clone(),
            inventory: InventoryDraw {
                open: self.inventory_open,
                items: store.load_inventory(),
            },
        }
    }
}
