use super::*;
use crate::geometry::{intersects, Rect, Vec2};
use crate::inventory::{InMemoryInventory, InventoryItem, InventoryStore};
use crate::objects::{ClickableObject, GameObject, NpcDialog};
use crate::registry::{Persistence, SceneRegistry};
use crate::text_window::{DialogLine, WindowMode};

const HERE: SceneKey = SceneKey::new("here");
const SCENE3: SceneKey = SceneKey::new("scene3");
const HOUSE: SceneKey = SceneKey::new("scene1_house");
const OUTSIDE: SceneKey = SceneKey::new("scene1");

const PLAYER_SIZE: Vec2 = Vec2 { x: 35.0, y: 35.0 };
// Player at (100, 100) has its centre at (117.5, 117.5); this rect is 22.5 away.
const NEAR_RECT: Rect = Rect {
    x1: 140.0,
    y1: 100.0,
    x2: 170.0,
    y2: 160.0,
};

fn empty_scene(key: SceneKey) -> Scene {
    Scene::new(key, Vec2::new(100.0, 100.0), PLAYER_SIZE)
}

fn registry_with(keys: &[(SceneKey, Persistence)]) -> SceneRegistry {
    let mut registry = SceneRegistry::new();
    for &(key, persistence) in keys {
        registry
            .register(key, persistence, move || {
                Scene::new(key, Vec2::new(230.0, 220.0), PLAYER_SIZE)
            })
            .expect("register");
    }
    registry
}

fn babay_big() -> GameObject {
    GameObject::new_npc(
        "babay_big",
        NEAR_RECT,
        NpcDialog::new([
            DialogLine::voiced("Сәлам!", "audios/babay/selem.ogg"),
            DialogLine::voiced("Мин бабай", "audios/babay/min_babay.ogg"),
        ])
        .with_persist_progress(true)
        .with_reward(vec![InventoryItem::new("бабай", "sprites/objects/grandpa.png")]),
    )
    .with_name("Бабай")
    .with_next_scene(SCENE3)
}

fn interact(
    scene: &mut Scene,
    registry: &mut SceneRegistry,
    store: &mut InMemoryInventory,
) -> SceneTransition {
    let mut ctx = SceneContext::new(registry, store);
    scene.interact(&mut ctx)
}

fn words(store: &InMemoryInventory) -> Vec<&str> {
    store.items().iter().map(|item| item.word.as_str()).collect()
}

#[test]
fn dialog_with_reward_ends_in_transition_on_third_interact() {
    let mut registry = registry_with(&[(SCENE3, Persistence::Fresh)]);
    let mut store = InMemoryInventory::new();
    let mut scene = empty_scene(HERE).with_object(babay_big());

    assert!(interact(&mut scene, &mut registry, &mut store).is_stay());
    assert_eq!(scene.text_window().mode(), WindowMode::Dialog);
    assert_eq!(scene.text_window().text(), "Сәлам!");
    assert_eq!(scene.text_window().voice_path(), Some("audios/babay/selem.ogg"));
    assert_eq!(scene.active_dialog_npc(), Some("babay_big"));

    assert!(interact(&mut scene, &mut registry, &mut store).is_stay());
    assert_eq!(scene.text_window().text(), "Мин бабай");
    assert!(store.items().is_empty());

    let next = interact(&mut scene, &mut registry, &mut store)
        .into_scene()
        .expect("transition to scene3");
    assert_eq!(next.name(), "scene3");
    assert_eq!(words(&store), vec!["бабай"]);
    assert!(!scene.in_dialog());
    assert_eq!(scene.text_window().mode(), WindowMode::Hidden);
    assert!(!scene.find_object("babay_big").expect("npc").interactable);
}

#[test]
fn dialog_cursor_is_monotonic_and_closes_after_line_count_calls() {
    let mut registry = SceneRegistry::new();
    let mut store = InMemoryInventory::new();
    let npc = GameObject::new_npc("talker", NEAR_RECT, NpcDialog::new(["one", "two", "three"]));
    let mut scene = empty_scene(HERE).with_object(npc);

    assert!(scene.start_dialog_with("talker"));
    let line_count = 3;
    let mut last_cursor = 1;
    for call in 1..=line_count {
        interact(&mut scene, &mut registry, &mut store);
        let cursor = scene
            .find_object("talker")
            .and_then(GameObject::dialog)
            .expect("dialog")
            .cursor();
        assert!(cursor >= last_cursor);
        assert!(cursor <= line_count);
        last_cursor = cursor;
        assert_eq!(scene.in_dialog(), call < line_count, "call {call}");
    }
}

#[test]
fn movement_is_frozen_while_dialog_is_open() {
    let mut scene = empty_scene(HERE).with_object(babay_big());
    assert!(scene.start_dialog_with("babay_big"));
    let before = scene.player_position();
    let texture_before = scene.player_texture_path().to_string();

    scene.move_left(10.0);
    scene.move_forward(10.0);

    assert_eq!(scene.player_position(), before);
    assert_eq!(scene.player_texture_path(), texture_before);
}

#[test]
fn blocked_axis_is_rejected_while_other_axis_slides() {
    let wall = GameObject::new_static("wall", Rect::new(140.0, 90.0, 200.0, 150.0)).with_solid(true);
    let mut scene = empty_scene(HERE).with_object(wall.clone());

    scene.move_right(20.0);
    assert_eq!(scene.player_position(), Vec2::new(100.0, 100.0));
    scene.move_back(20.0);
    assert_eq!(scene.player_position(), Vec2::new(100.0, 120.0));
    assert!(!intersects(&scene.player_rect(), &wall.rect));

    scene.move_by(20.0, 20.0);
    assert_eq!(scene.player_position(), Vec2::new(100.0, 140.0));
    assert!(!intersects(&scene.player_rect(), &wall.rect));
}

#[test]
fn player_may_stand_flush_against_a_wall() {
    let wall = GameObject::new_static("wall", Rect::new(145.0, 0.0, 200.0, 300.0)).with_solid(true);
    let mut scene = empty_scene(HERE).with_object(wall);

    scene.move_right(10.0);
    assert_eq!(scene.player_position().x, 110.0);
    scene.move_right(1.0);
    assert_eq!(scene.player_position().x, 110.0);
}

#[test]
fn non_solid_objects_do_not_block() {
    let decor = GameObject::new_static("bg", Rect::new(0.0, 0.0, 496.0, 279.0));
    let mut scene = empty_scene(HERE).with_object(decor);
    scene.move_right(20.0);
    assert_eq!(scene.player_position(), Vec2::new(120.0, 100.0));
}

#[test]
fn no_move_sequence_ends_inside_a_solid() {
    let walls = [
        Rect::new(60.0, 60.0, 90.0, 200.0),
        Rect::new(140.0, 80.0, 160.0, 160.0),
        Rect::new(90.0, 150.0, 140.0, 170.0),
    ];
    let mut scene = empty_scene(HERE).with_objects(
        walls
            .iter()
            .enumerate()
            .map(|(i, rect)| GameObject::new_static(format!("wall{i}"), *rect).with_solid(true)),
    );

    let mut seed: u32 = 0x2545_f491;
    for _ in 0..500 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let step = (seed % 7 + 1) as f32;
        match seed % 4 {
            0 => scene.move_forward(step),
            1 => scene.move_back(step),
            2 => scene.move_left(step),
            _ => scene.move_right(step),
        }
        for wall in &walls {
            assert!(!intersects(&scene.player_rect(), wall));
        }
    }
}

#[test]
fn sprite_path_tracks_facing_and_wraps_after_five_frames() {
    let mut scene = empty_scene(HERE);
    assert_eq!(scene.player_texture_path(), "sprites/bahtiyar/down0.png");

    scene.move_right(1.0);
    assert_eq!(scene.player_texture_path(), "sprites/bahtiyar/right0.png");
    for _ in 0..3 {
        scene.move_right(1.0);
    }
    assert_eq!(scene.player_texture_path(), "sprites/bahtiyar/right1.png");

    scene.move_forward(1.0);
    assert_eq!(scene.player_texture_path(), "sprites/bahtiyar/up1.png");

    for _ in 0..15 {
        scene.move_left(1.0);
    }
    assert_eq!(scene.animation_frame(), 0);
    assert_eq!(scene.player_texture_path(), "sprites/bahtiyar/left0.png");
}

#[test]
fn animation_advances_even_when_blocked() {
    let wall = GameObject::new_static("wall", Rect::new(135.0, 0.0, 200.0, 300.0)).with_solid(true);
    let mut scene = empty_scene(HERE).with_object(wall).with_animation_speed(1);
    scene.move_right(5.0);
    assert_eq!(scene.player_position().x, 100.0);
    assert_eq!(scene.player_texture_path(), "sprites/bahtiyar/right1.png");
}

#[test]
fn hint_follows_proximity() {
    let door = GameObject::new_static("door", Rect::new(180.0, 100.0, 200.0, 160.0))
        .with_interactable(true);
    let mut scene = empty_scene(HERE).with_object(door);
    scene.update_hint();
    assert_eq!(scene.text_window().mode(), WindowMode::Hidden);

    scene.move_right(40.0);
    assert!(scene.text_window().is_hint());
    assert_eq!(scene.text_window().text(), HINT_TEXT);
    assert_eq!(scene.text_window().source_object_id(), Some("door"));

    scene.move_left(40.0);
    assert_eq!(scene.text_window().mode(), WindowMode::Hidden);
}

#[test]
fn equidistant_candidates_resolve_to_first_in_scene_order() {
    let left = GameObject::new_static("left", Rect::new(70.0, 100.0, 90.0, 130.0))
        .with_interactable(true);
    let right = GameObject::new_static("right", Rect::new(145.0, 100.0, 165.0, 130.0))
        .with_interactable(true);
    let mut scene = empty_scene(HERE).with_objects([left, right]);
    let (index, distance) = scene.nearest_interactable().expect("candidate");
    assert_eq!(index, 0);
    assert_eq!(distance, 27.5);

    scene.update_hint();
    assert_eq!(scene.text_window().source_object_id(), Some("left"));
}

#[test]
fn interact_out_of_range_does_nothing() {
    let mut registry = registry_with(&[(SCENE3, Persistence::Fresh)]);
    let mut store = InMemoryInventory::new();
    let far = GameObject::new_static("far", Rect::new(400.0, 400.0, 420.0, 420.0))
        .with_interactable(true)
        .with_next_scene(SCENE3);
    let mut scene = empty_scene(HERE).with_object(far);
    assert!(interact(&mut scene, &mut registry, &mut store).is_stay());
    assert_eq!(scene.text_window().mode(), WindowMode::Hidden);
}

#[test]
fn toggle_inventory_is_ignored_during_dialog() {
    let mut scene = empty_scene(HERE).with_object(babay_big());
    scene.start_dialog_with("babay_big");
    scene.toggle_inventory();
    assert!(!scene.inventory_open());
    assert!(scene.text_window().is_dialog());
}

#[test]
fn open_inventory_hides_hint_and_blocks_commands() {
    let mut registry = registry_with(&[(SCENE3, Persistence::Fresh)]);
    let mut store = InMemoryInventory::new();
    let mut scene = empty_scene(HERE).with_object(babay_big());
    scene.update_hint();
    assert!(scene.text_window().is_hint());

    scene.toggle_inventory();
    assert!(scene.inventory_open());
    assert_eq!(scene.text_window().mode(), WindowMode::Hidden);

    scene.move_left(10.0);
    assert_eq!(scene.player_position(), Vec2::new(100.0, 100.0));
    assert!(interact(&mut scene, &mut registry, &mut store).is_stay());
    assert!(!scene.in_dialog());

    scene.toggle_inventory();
    assert!(!scene.inventory_open());
    assert!(scene.text_window().is_hint());
}

#[test]
fn click_outside_every_target_changes_nothing() {
    let mut store = InMemoryInventory::new();
    let mut scene = empty_scene(HERE).with_clickable(
        ClickableObject::new(
            "apple",
            Rect::new(10.0, 10.0, 30.0, 30.0),
            InventoryItem::new("алма", "sprites/words/alma.png"),
        )
        .with_voice("audios/alma.ogg"),
    );

    let outcome = scene.process_click(50.0, 50.0, &mut store);
    assert_eq!(outcome, ClickOutcome::default());
    assert!(outcome.is_empty());
    assert_eq!(scene.clickables().len(), 1);
    assert!(store.items().is_empty());
}

#[test]
fn click_inside_target_grants_once_and_removes_it() {
    let mut store = InMemoryInventory::new();
    let mut scene = empty_scene(HERE).with_clickable(
        ClickableObject::new(
            "apple",
            Rect::new(10.0, 10.0, 30.0, 30.0),
            InventoryItem::new("алма", "sprites/words/alma.png"),
        )
        .with_voice("audios/alma.ogg"),
    );

    let outcome = scene.process_click(20.0, 20.0, &mut store);
    assert_eq!(outcome.word.as_deref(), Some("алма"));
    assert_eq!(outcome.voice.as_deref(), Some("audios/alma.ogg"));
    assert!(scene.clickables().is_empty());
    assert_eq!(words(&store), vec!["алма"]);

    let again = scene.process_click(20.0, 20.0, &mut store);
    assert!(again.is_empty());
    assert_eq!(store.items().len(), 1);
}

#[test]
fn vanished_dialog_npc_closes_dialog_quietly() {
    let mut registry = SceneRegistry::new();
    let mut store = InMemoryInventory::new();
    let mut scene = empty_scene(HERE).with_object(babay_big());
    scene.start_dialog_with("babay_big");
    scene.remove_object("babay_big");

    assert!(interact(&mut scene, &mut registry, &mut store).is_stay());
    assert!(!scene.in_dialog());
    assert_eq!(scene.text_window().mode(), WindowMode::Hidden);
    assert!(store.items().is_empty());
}

#[test]
fn exhausted_npc_never_grants_reward_twice() {
    let mut registry = SceneRegistry::new();
    let mut store = InMemoryInventory::new();
    let npc = GameObject::new_npc(
        "ebi",
        NEAR_RECT,
        NpcDialog::new(["Исәнмесез!"])
            .with_reward(vec![InventoryItem::new("әби", "sprites/objects/grandma.png")]),
    );
    let mut scene = empty_scene(HERE).with_object(npc);

    for _ in 0..6 {
        interact(&mut scene, &mut registry, &mut store);
    }
    scene.add_element(
        &mut store,
        &InventoryItem::new("әби", "sprites/objects/grandma.png"),
    );

    assert_eq!(words(&store), vec!["әби"]);
    let npc = scene.find_object("ebi").expect("npc");
    assert!(!npc.interactable);
    assert!(npc.dialog().expect("dialog").pending_reward().is_none());
    assert!(!scene.in_dialog());
}

#[test]
fn repeatable_npc_restarts_but_rewards_once() {
    let mut registry = SceneRegistry::new();
    let mut store = InMemoryInventory::new();
    let npc = GameObject::new_npc(
        "flower",
        NEAR_RECT,
        NpcDialog::new(["Чәчәк"])
            .with_repeatable(true)
            .with_reward(vec![InventoryItem::new("чәчәк", "flower.png")]),
    );
    let mut scene = empty_scene(HERE).with_object(npc);

    interact(&mut scene, &mut registry, &mut store);
    interact(&mut scene, &mut registry, &mut store);
    assert!(!scene.in_dialog());
    assert!(scene.find_object("flower").expect("npc").interactable);

    interact(&mut scene, &mut registry, &mut store);
    assert!(scene.in_dialog());
    assert_eq!(scene.text_window().text(), "Чәчәк");
    interact(&mut scene, &mut registry, &mut store);
    assert_eq!(words(&store), vec!["чәчәк"]);
}

#[test]
fn persistent_npc_resumes_after_abandoned_session() {
    let mut registry = SceneRegistry::new();
    let mut store = InMemoryInventory::new();
    let mut scene = empty_scene(HERE).with_object(babay_big());

    interact(&mut scene, &mut registry, &mut store);
    scene.abandon_dialog();
    assert!(!scene.in_dialog());

    interact(&mut scene, &mut registry, &mut store);
    assert_eq!(scene.text_window().text(), "Мин бабай");
}

#[test]
fn start_dialog_with_rejects_non_npc_targets() {
    let door = GameObject::new_static("door", NEAR_RECT).with_interactable(true);
    let mut scene = empty_scene(HERE).with_object(door);
    assert!(!scene.start_dialog_with("door"));
    assert!(!scene.start_dialog_with("nobody"));
    assert!(!scene.in_dialog());
}

#[test]
fn entering_interior_remembers_outside_position() {
    let mut registry = registry_with(&[(HOUSE, Persistence::Singleton)]);
    let mut store = InMemoryInventory::new();
    let door = GameObject::new_static("door", NEAR_RECT)
        .with_interactable(true)
        .with_next_scene(HOUSE);
    let mut outside = empty_scene(OUTSIDE).with_object(door);

    let house = interact(&mut outside, &mut registry, &mut store)
        .into_scene()
        .expect("house");
    assert_eq!(house.key(), HOUSE);
    assert_eq!(house.player_position(), Vec2::new(230.0, 220.0));
    assert_eq!(house.return_position(), Some(Vec2::new(100.0, 100.0)));
}

#[test]
fn leaving_interior_places_player_at_return_position() {
    let mut registry = registry_with(&[(OUTSIDE, Persistence::Fresh)]);
    let mut store = InMemoryInventory::new();
    let exit = GameObject::new_static("door_exit", Rect::new(240.0, 220.0, 260.0, 250.0))
        .with_interactable(true)
        .with_next_scene(OUTSIDE);
    let mut house = Scene::new(HOUSE, Vec2::new(230.0, 220.0), PLAYER_SIZE).with_object(exit);
    house.return_position = Some(Vec2::new(150.0, 160.0));

    let outside = interact(&mut house, &mut registry, &mut store)
        .into_scene()
        .expect("outside");
    assert_eq!(outside.player_position(), Vec2::new(150.0, 160.0));
    assert_eq!(outside.return_position(), None);
}

#[test]
fn non_interior_transition_copies_player_position() {
    let mut registry = registry_with(&[(SCENE3, Persistence::Fresh)]);
    let mut store = InMemoryInventory::new();
    let mut scene = empty_scene(HERE).with_object(babay_big());
    scene.set_player_position(Vec2::new(110.0, 105.0));

    for _ in 0..2 {
        interact(&mut scene, &mut registry, &mut store);
    }
    let next = interact(&mut scene, &mut registry, &mut store)
        .into_scene()
        .expect("scene3");
    assert_eq!(next.player_position(), Vec2::new(110.0, 105.0));
}

#[test]
fn dialog_exit_into_interior_carries_position_and_return_unchanged() {
    let mut registry = registry_with(&[(HOUSE, Persistence::Fresh)]);
    let mut store = InMemoryInventory::new();
    let mut scene = empty_scene(HERE).with_object(babay_big().with_next_scene(HOUSE));
    scene.set_player_position(Vec2::new(110.0, 105.0));
    scene.return_position = Some(Vec2::new(5.0, 6.0));
    scene.start_dialog_with("babay_big");

    assert!(interact(&mut scene, &mut registry, &mut store).is_stay());
    let house = interact(&mut scene, &mut registry, &mut store)
        .into_scene()
        .expect("house");
    assert_eq!(house.key(), HOUSE);
    assert_eq!(house.player_position(), Vec2::new(110.0, 105.0));
    assert_eq!(house.return_position(), Some(Vec2::new(5.0, 6.0)));
}

#[test]
fn unknown_target_scene_degrades_to_stay() {
    let mut registry = SceneRegistry::new();
    let mut store = InMemoryInventory::new();
    let door = GameObject::new_static("door", NEAR_RECT)
        .with_interactable(true)
        .with_next_scene(SceneKey::new("nowhere"));
    let mut scene = empty_scene(HERE).with_object(door);
    assert!(interact(&mut scene, &mut registry, &mut store).is_stay());
}

#[test]
fn draw_data_is_a_side_effect_free_snapshot() {
    let mut store = InMemoryInventory::new();
    store.add_inventory_item("бабай", "sprites/objects/grandpa.png");
    let background = GameObject::new_static("bg", Rect::new(0.0, 0.0, 496.0, 279.0))
        .with_texture("sprites/backgrounds/root.png")
        .with_scaled_texture();
    let mut scene = empty_scene(HERE).with_objects([babay_big().with_z(1), background]);
    scene.start_dialog_with("babay_big");

    let first = scene.draw_data(&store);
    let second = scene.draw_data(&store);
    assert_eq!(first, second);

    assert_eq!(first.scene, HERE);
    assert_eq!(first.objects[0].id, "bg");
    assert_eq!(first.objects[1].id, "babay_big");
    assert_eq!(first.objects[1].variant, crate::objects::ObjectVariant::Npc);
    assert_eq!(
        first.objects[1].dialog,
        Some(DialogProgress {
            current: 1,
            total: 2
        })
    );
    assert_eq!(first.objects[0].dialog, None);
    assert_eq!(first.ui.mode(), WindowMode::Dialog);
    assert_eq!(first.player.rect, Rect::new(100.0, 100.0, 135.0, 135.0));
    assert!(!first.inventory.open);
    assert_eq!(first.inventory.items.len(), 1);
}

#[test]
fn draw_order_sorts_by_z_then_bottom_edge() {
    let store = InMemoryInventory::new();
    let tall = GameObject::new_static("tall", Rect::new(0.0, 0.0, 10.0, 200.0)).with_z(1);
    let short = GameObject::new_static("short", Rect::new(0.0, 0.0, 10.0, 50.0)).with_z(1);
    let bg = GameObject::new_static("bg", Rect::new(0.0, 0.0, 496.0, 279.0));
    let scene = empty_scene(HERE).with_objects([tall, short, bg]);

    let data = scene.draw_data(&store);
    let order: Vec<String> = data
        .draw_order()
        .into_iter()
        .map(|item| match item {
            DrawItem::Player(_) => "player".to_string(),
            DrawItem::Object(object) => object.id.clone(),
        })
        .collect();
    assert_eq!(order, vec!["bg", "short", "player", "tall"]);
}

#[test]
fn draw_data_serializes_with_snake_case_tags() {
    let store = InMemoryInventory::new();
    let scene = empty_scene(HERE).with_object(babay_big());
    let value = serde_json::to_value(scene.draw_data(&store)).expect("json");
    assert_eq!(value["scene"], "here");
    assert_eq!(value["ui"]["mode"], "hidden");
    assert_eq!(value["objects"][0]["variant"], "npc");
    assert_eq!(value["player"]["texture_path"], "sprites/bahtiyar/down0.png");
}

#[test]
fn interact_distance_is_never_negative() {
    let scene = empty_scene(HERE).with_interact_distance(-5.0);
    assert_eq!(scene.interact_distance(), 0.0);
    let scene = empty_scene(HERE).with_interact_distance(f32::NAN);
    assert_eq!(scene.interact_distance(), 0.0);
}
