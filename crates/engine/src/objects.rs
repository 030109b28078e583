use serde::Serialize;

use crate::geometry::Rect;
use crate::inventory::InventoryItem;
use crate::scene::SceneKey;
use crate::text_window::DialogLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectVariant {
    Static,
    Npc,
    Clickable,
}

/// Scripted dialog carried by an NPC.
///
/// `cursor` counts the lines already shown in the current session and never
/// exceeds the line count.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcDialog {
    lines: Vec<DialogLine>,
    cursor: usize,
    repeatable: bool,
    persist_progress: bool,
    reward: Option<Vec<InventoryItem>>,
}

impl NpcDialog {
    pub fn new<L>(lines: impl IntoIterator<Item = L>) -> Self
    where
        L: Into<DialogLine>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            cursor: 0,
            repeatable: false,
            persist_progress: false,
            reward: None,
        }
    }

    pub fn with_repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    pub fn with_persist_progress(mut self, persist_progress: bool) -> Self {
        self.persist_progress = persist_progress;
        self
    }

    pub fn with_reward(mut self, reward: Vec<InventoryItem>) -> Self {
        self.reward = if reward.is_empty() { None } else { Some(reward) };
        self
    }

    pub fn lines(&self) -> &[DialogLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub fn persists_progress(&self) -> bool {
        self.persist_progress
    }

    pub fn pending_reward(&self) -> Option<&[InventoryItem]> {
        self.reward.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.lines.len()
    }

    pub fn can_start(&self) -> bool {
        !self.lines.is_empty() && (!self.is_finished() || self.repeatable)
    }

    /// Opens a session and returns its first line.
    pub(crate) fn begin_session(&mut self) -> Option<&DialogLine> {
        if !self.persist_progress || self.is_finished() {
            self.cursor = 0;
        }
        self.next_line()
    }

    pub(crate) fn next_line(&mut self) -> Option<&DialogLine> {
        let index = self.cursor;
        if index >= self.lines.len() {
            return None;
        }
        self.cursor += 1;
        self.lines.get(index)
    }

    pub(crate) fn take_reward(&mut self) -> Option<Vec<InventoryItem>> {
        self.reward.take()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Static,
    Npc(NpcDialog),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub id: String,
    pub name: Option<String>,
    pub rect: Rect,
    pub solid: bool,
    pub interactable: bool,
    pub next_scene: Option<SceneKey>,
    pub texture_path: Option<String>,
    pub z: i32,
    pub scale_texture_to_rect: bool,
    pub kind: ObjectKind,
}

impl GameObject {
    pub fn new_static(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            name: None,
            rect,
            solid: false,
            interactable: false,
            next_scene: None,
            texture_path: None,
            z: 0,
            scale_texture_to_rect: false,
            kind: ObjectKind::Static,
        }
    }

    pub fn new_npc(id: impl Into<String>, rect: Rect, dialog: NpcDialog) -> Self {
        Self {
            interactable: true,
            kind: ObjectKind::Npc(dialog),
            ..Self::new_static(id, rect)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn with_interactable(mut self, interactable: bool) -> Self {
        self.interactable = interactable;
        self
    }

    pub fn with_next_scene(mut self, next_scene: SceneKey) -> Self {
        self.next_scene = Some(next_scene);
        self
    }

    pub fn with_texture(mut self, texture_path: impl Into<String>) -> Self {
        self.texture_path = Some(texture_path.into());
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_scaled_texture(mut self) -> Self {
        self.scale_texture_to_rect = true;
        self
    }

    pub fn variant(&self) -> ObjectVariant {
        match self.kind {
            ObjectKind::Static => ObjectVariant::Static,
            ObjectKind::Npc(_) => ObjectVariant::Npc,
        }
    }

    pub fn dialog(&self) -> Option<&NpcDialog> {
        match &self.kind {
            ObjectKind::Npc(dialog) => Some(dialog),
            ObjectKind::Static => None,
        }
    }

    pub fn dialog_mut(&mut self) -> Option<&mut NpcDialog> {
        match &mut self.kind {
            ObjectKind::Npc(dialog) => Some(dialog),
            ObjectKind::Static => None,
        }
    }

    /// Scene this object leads to when used. NPCs only lead on once their
    /// dialog has run to the end.
    pub fn on_interact(&self) -> Option<SceneKey> {
        match &self.kind {
            ObjectKind::Static => self.next_scene,
            ObjectKind::Npc(dialog) if dialog.is_finished() => self.next_scene,
            ObjectKind::Npc(_) => None,
        }
    }
}

/// Pointer target that hands out one reward and then disappears.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickableObject {
    pub id: String,
    pub rect: Rect,
    pub reward: InventoryItem,
    pub voice: Option<String>,
    pub z: i32,
}

impl ClickableObject {
    pub fn new(id: impl Into<String>, rect: Rect, reward: InventoryItem) -> Self {
        Self {
            id: id.into(),
            rect,
            reward,
            voice: None,
            z: 0,
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }
}
