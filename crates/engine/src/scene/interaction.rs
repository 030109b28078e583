use serde::Serialize;
use tracing::{debug, info, warn};

use super::{Scene, SceneContext, SceneKey, SceneTransition, HINT_TEXT};
use crate::geometry::{distance_point_to_rect, Vec2};
use crate::inventory::{grant_item, grant_items, InventoryItem, InventoryStore};
use crate::objects::ObjectKind;

/// What a click handed out, for the renderer to show or play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClickOutcome {
    pub word: Option<String>,
    pub voice: Option<String>,
}

impl ClickOutcome {
    pub fn is_empty(&self) -> bool {
        self.word.is_none() && self.voice.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Departure {
    Direct,
    Dialog,
}

impl Scene {
    /// Nearest interactable object to the player's centre. Equal distances
    /// keep the earlier object in scene order.
    pub fn nearest_interactable(&self) -> Option<(usize, f32)> {
        let center = self.player_rect().center();
        let mut best: Option<(usize, f32)> = None;
        for (index, object) in self.objects.iter().enumerate() {
            if !object.interactable {
                continue;
            }
            let distance = distance_point_to_rect(center, &object.rect);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }
        best
    }

    fn interactable_in_range(&self) -> Option<usize> {
        self.nearest_interactable()
            .filter(|(_, distance)| *distance <= self.interact_distance)
            .map(|(index, _)| index)
    }

    pub fn update_hint(&mut self) {
        let target = if self.in_dialog() || self.inventory_open {
            None
        } else {
            self.interactable_in_range()
        };

        match target {
            Some(index) => {
                let id = self.objects[index].id.clone();
                if self.text_window.source_object_id() != Some(id.as_str()) {
                    debug!(scene = %self.key, object = %id, "hint_shown");
                }
                self.text_window.show_hint(HINT_TEXT, &id);
            }
            None => {
                if self.text_window.is_hint() {
                    self.text_window.hide();
                }
            }
        }
    }

    pub fn interact(&mut self, ctx: &mut SceneContext<'_>) -> SceneTransition {
        if self.inventory_open {
            return SceneTransition::Stay;
        }
        if self.in_dialog() {
            return self.advance_dialog(ctx);
        }

        let Some(index) = self.interactable_in_range() else {
            return SceneTransition::Stay;
        };
        let object = &self.objects[index];
        if let ObjectKind::Npc(dialog) = &object.kind {
            if dialog.can_start() {
                let id = object.id.clone();
                self.start_dialog_with(&id);
                return SceneTransition::Stay;
            }
        }

        match object.on_interact() {
            Some(next) => self.transition_to(next, Departure::Direct, ctx),
            None => SceneTransition::Stay,
        }
    }

    /// Opens a dialog session with `npc_id` and shows its first line.
    /// Returns false when the object is missing, not an NPC, or has nothing to say.
    pub fn start_dialog_with(&mut self, npc_id: &str) -> bool {
        let Some(object) = self.objects.iter_mut().find(|object| object.id == npc_id) else {
            return false;
        };
        let Some(dialog) = object.dialog_mut() else {
            return false;
        };
        if !dialog.can_start() {
            return false;
        }
        let Some(line) = dialog.begin_session().cloned() else {
            return false;
        };
        let progress = (dialog.cursor(), dialog.line_count());

        self.active_dialog_npc = Some(npc_id.to_string());
        self.text_window.show_dialog(&line, npc_id);
        debug!(
            scene = %self.key,
            npc = npc_id,
            line = progress.0,
            total = progress.1,
            "dialog_started"
        );
        true
    }

    fn advance_dialog(&mut self, ctx: &mut SceneContext<'_>) -> SceneTransition {
        let Some(npc_id) = self.active_dialog_npc.clone() else {
            return SceneTransition::Stay;
        };
        let Some(object) = self.objects.iter_mut().find(|object| object.id == npc_id) else {
            warn!(scene = %self.key, npc = %npc_id, "dialog_npc_missing");
            self.close_dialog();
            return SceneTransition::Stay;
        };
        let Some(dialog) = object.dialog_mut() else {
            warn!(scene = %self.key, npc = %npc_id, "dialog_npc_missing");
            self.close_dialog();
            return SceneTransition::Stay;
        };

        if let Some(line) = dialog.next_line().cloned() {
            debug!(
                scene = %self.key,
                npc = %npc_id,
                line = dialog.cursor(),
                total = dialog.line_count(),
                "dialog_advanced"
            );
            self.text_window.show_dialog(&line, &npc_id);
            return SceneTransition::Stay;
        }

        let reward = dialog.take_reward();
        if !dialog.is_repeatable() {
            object.interactable = false;
        }
        let next = object.on_interact();
        self.close_dialog();
        debug!(scene = %self.key, npc = %npc_id, "dialog_finished");

        if let Some(items) = reward {
            grant_items(&mut *ctx.inventory, &items);
        }

        match next {
            Some(next) => self.transition_to(next, Departure::Dialog, ctx),
            None => {
                self.update_hint();
                SceneTransition::Stay
            }
        }
    }

    fn close_dialog(&mut self) {
        self.active_dialog_npc = None;
        self.text_window.hide();
    }

    /// Drops an unfinished session without touching the NPC's cursor.
    pub fn abandon_dialog(&mut self) {
        if self.in_dialog() {
            debug!(scene = %self.key, "dialog_abandoned");
            self.close_dialog();
        }
    }

    fn transition_to(
        &self,
        next: SceneKey,
        departure: Departure,
        ctx: &mut SceneContext<'_>,
    ) -> SceneTransition {
        match ctx.registry.get_or_create(next) {
            Ok(mut scene) => {
                self.hand_off(&mut scene, departure);
                scene.update_hint();
                info!(from = %self.key, to = %next, "scene_transition");
                SceneTransition::TransitionTo(Box::new(scene))
            }
            Err(error) => {
                warn!(from = %self.key, to = %next, %error, "scene_transition_failed");
                SceneTransition::Stay
            }
        }
    }

    /// A finished dialog carries position and return position over as they are.
    /// After a direct interaction, interiors keep their own spawn point and
    /// remember where to put the player back outside; every other scene
    /// receives that outside position.
    fn hand_off(&self, next: &mut Scene, departure: Departure) {
        if departure == Departure::Dialog {
            next.player_position = self.player_position;
            next.return_position = self.return_position;
            return;
        }
        let outside: Vec2 = self.return_position.unwrap_or(self.player_position);
        if next.key.is_interior() {
            next.return_position = Some(outside);
        } else {
            next.player_position = outside;
            next.return_position = None;
        }
    }

    pub fn toggle_inventory(&mut self) {
        if self.in_dialog() {
            return;
        }
        self.inventory_open = !self.inventory_open;
        debug!(scene = %self.key, open = self.inventory_open, "inventory_toggled");
        if self.inventory_open {
            if self.text_window.is_hint() {
                self.text_window.hide();
            }
        } else {
            self.update_hint();
        }
    }

    pub fn add_element(&self, store: &mut dyn InventoryStore, item: &InventoryItem) -> bool {
        grant_item(store, item)
    }

    pub fn add_elements(&self, store: &mut dyn InventoryStore, items: &[InventoryItem]) -> usize {
        grant_items(store, items)
    }

    pub fn process_click(
        &mut self,
        x: f32,
        y: f32,
        store: &mut dyn InventoryStore,
    ) -> ClickOutcome {
        let point = Vec2::new(x, y);
        let Some(index) = self
            .clickables
            .iter()
            .position(|clickable| clickable.rect.contains_point(point))
        else {
            return ClickOutcome::default();
        };

        let clickable = self.clickables.remove(index);
        grant_item(store, &clickable.reward);
        info!(scene = %self.key, clickable = %clickable.id, "clickable_consumed");
        ClickOutcome {
            word: Some(clickable.reward.word),
            voice: clickable.voice,
        }
    }
}
