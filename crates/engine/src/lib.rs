pub mod geometry;
pub mod inventory;
pub mod objects;
pub mod registry;
pub mod scene;
pub mod text_window;

pub use geometry::{distance_point_to_rect, intersects, Rect, Vec2};
pub use inventory::{grant_item, grant_items, InMemoryInventory, InventoryItem, InventoryStore};
pub use objects::{ClickableObject, GameObject, NpcDialog, ObjectKind, ObjectVariant};
pub use registry::{Persistence, RegistryError, SceneFactory, SceneRegistry};
pub use scene::{
    ClickOutcome, DialogProgress, DrawData, DrawItem, Facing, InventoryDraw, ObjectDraw,
    PlayerDraw, Scene, SceneContext, SceneKey, SceneTransition, ANIMATION_FRAME_COUNT,
    DEFAULT_ANIMATION_SPEED, DEFAULT_INTERACT_DISTANCE, DEFAULT_PLAYER_SPRITE_BASE, HINT_TEXT,
    INTERIOR_SCENE_SUFFIX,
};
pub use text_window::{DialogLine, TextWindow, WindowMode};
