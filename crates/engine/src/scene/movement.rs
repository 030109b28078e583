use super::{Scene, ANIMATION_FRAME_COUNT};
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl Scene {
    pub fn move_forward(&mut self, step: f32) {
        self.step_player(Facing::Up, 0.0, -step);
    }

    pub fn move_back(&mut self, step: f32) {
        self.step_player(Facing::Down, 0.0, step);
    }

    pub fn move_left(&mut self, step: f32) {
        self.step_player(Facing::Left, -step, 0.0);
    }

    pub fn move_right(&mut self, step: f32) {
        self.step_player(Facing::Right, step, 0.0);
    }

    fn movement_locked(&self) -> bool {
        self.in_dialog() || self.inventory_open
    }

    fn step_player(&mut self, facing: Facing, dx: f32, dy: f32) {
        if self.movement_locked() {
            return;
        }
        self.advance_animation(facing);
        self.move_by(dx, dy);
    }

    /// Sprite path is `<base>/<facing><frame>.png`; the frame advances every
    /// `animation_speed` steps and wraps after `ANIMATION_FRAME_COUNT`.
    fn advance_animation(&mut self, facing: Facing) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
        if self.animation_tick % self.animation_speed == 0 {
            self.animation_frame = (self.animation_frame + 1) % ANIMATION_FRAME_COUNT;
        }
        self.player_texture_path = format!(
            "{}/{}{}.png",
            self.player_sprite_base,
            facing.as_token(),
            self.animation_frame
        );
    }

    /// Moves the player, resolving X then Y independently so the player
    /// slides along solid edges instead of sticking.
    pub(crate) fn move_by(&mut self, dx: f32, dy: f32) {
        if self.movement_locked() {
            return;
        }

        let mut moved = false;
        if dx != 0.0 {
            let candidate = self.player_rect().moved(dx, 0.0);
            if !self.blocked(&candidate) {
                self.player_position.x += dx;
                moved = true;
            }
        }
        if dy != 0.0 {
            let candidate = self.player_rect().moved(0.0, dy);
            if !self.blocked(&candidate) {
                self.player_position.y += dy;
                moved = true;
            }
        }

        if moved {
            self.update_hint();
        }
    }

    fn blocked(&self, candidate: &Rect) -> bool {
        self.objects
            .iter()
            .any(|object| object.solid && object.rect.intersects(candidate))
    }
}
