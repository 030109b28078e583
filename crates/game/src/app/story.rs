use quest_engine::{
    ClickableObject, DialogLine, GameObject, InventoryItem, NpcDialog, Persistence, Rect,
    RegistryError, Scene, SceneKey, SceneRegistry, Vec2,
};

pub(crate) const SCENE1: SceneKey = SceneKey::new("scene1");
pub(crate) const SCENE2: SceneKey = SceneKey::new("scene2");
pub(crate) const SCENE3: SceneKey = SceneKey::new("scene3");
pub(crate) const SCENE4: SceneKey = SceneKey::new("scene4");
pub(crate) const SCENE5: SceneKey = SceneKey::new("scene5");
pub(crate) const SCENE6: SceneKey = SceneKey::new("scene6");
pub(crate) const SCENE7: SceneKey = SceneKey::new("scene7");
pub(crate) const SCENE8: SceneKey = SceneKey::new("scene8");
pub(crate) const SCENE9: SceneKey = SceneKey::new("scene9");
pub(crate) const SCENE1_HOUSE: SceneKey = SceneKey::new("scene1_house");
pub(crate) const SCENE3_HOUSE: SceneKey = SceneKey::new("scene3_house");
pub(crate) const SCENE5_HOUSE: SceneKey = SceneKey::new("scene5_house");
pub(crate) const SCENE7_HOUSE: SceneKey = SceneKey::new("scene7_house");
pub(crate) const SCENE9_HOUSE: SceneKey = SceneKey::new("scene9_house");

pub(crate) const START_SCENE: SceneKey = SCENE1;

const WORLD: Rect = Rect {
    x1: 0.0,
    y1: 0.0,
    x2: 496.0,
    y2: 279.0,
};
const HOUSE1_RECT: Rect = Rect {
    x1: 85.0,
    y1: 35.0,
    x2: 220.0,
    y2: 160.0,
};
const HOUSE2_RECT: Rect = Rect {
    x1: 330.0,
    y1: 110.0,
    x2: 475.0,
    y2: 240.0,
};
const FLOWER_RECT: Rect = Rect {
    x1: 238.0,
    y1: 212.0,
    x2: 258.0,
    y2: 236.0,
};
const IDLE_BABAY_RECT: Rect = Rect {
    x1: 368.0,
    y1: 220.0,
    x2: 390.0,
    y2: 255.0,
};

const OUTDOOR_SPAWN: Vec2 = Vec2::new(230.0, 220.0);
const OFFSCREEN_SPAWN: Vec2 = Vec2::new(-100.0, -100.0);
const WALKER_SIZE: Vec2 = Vec2::new(35.0, 35.0);
const INDOOR_WALKER_SIZE: Vec2 = Vec2::new(70.0, 70.0);
const INTERACT_DISTANCE: f32 = 28.0;

const ROOT_BACKGROUND: &str = "sprites/backgrounds/root.png";
const HOME_BACKGROUND: &str = "sprites/backgrounds/home.png";
const HOUSE1_TEXTURE: &str = "sprites/objects/house1.png";
const HOUSE1_HIGHLIGHT: &str = "sprites/objects/house_highlited.png";
const HOUSE2_TEXTURE: &str = "sprites/objects/house2.png";
const GRANDPA_TEXTURE: &str = "sprites/objects/grandpa.png";
const GRANDMA_TEXTURE: &str = "sprites/objects/grandma.png";
const FLOWER_TEXTURE: &str = "sprites/objects/flower/flower.png";

/// Wires the whole storyline: walk to grandpa, meet grandma, find the flower,
/// bring it back. Outdoor scenes the player can return to, and their
/// interiors, keep their state between visits.
pub(crate) fn build_story_registry() -> Result<SceneRegistry, RegistryError> {
    let mut registry = SceneRegistry::new();

    registry.register(SCENE1, Persistence::Singleton, scene1)?;
    registry.register(SCENE2, Persistence::Fresh, scene2)?;
    registry.register(SCENE3, Persistence::Fresh, scene3)?;
    registry.register(SCENE4, Persistence::Fresh, scene4)?;
    registry.register(SCENE5, Persistence::Singleton, scene5)?;
    registry.register(SCENE6, Persistence::Fresh, scene6)?;
    registry.register(SCENE7, Persistence::Fresh, scene7)?;
    registry.register(SCENE8, Persistence::Fresh, scene8)?;
    registry.register(SCENE9, Persistence::Singleton, scene9)?;

    registry.register(SCENE1_HOUSE, Persistence::Singleton, || {
        house_scene(SCENE1_HOUSE, SCENE1, None)
    })?;
    registry.register(SCENE3_HOUSE, Persistence::Fresh, || {
        house_scene(SCENE3_HOUSE, SCENE3, Some(SCENE4))
    })?;
    registry.register(SCENE5_HOUSE, Persistence::Singleton, || {
        house_scene(SCENE5_HOUSE, SCENE5, None)
    })?;
    registry.register(SCENE7_HOUSE, Persistence::Fresh, || {
        house_scene(SCENE7_HOUSE, SCENE7, Some(SCENE8))
    })?;
    registry.register(SCENE9_HOUSE, Persistence::Singleton, || {
        house_scene(SCENE9_HOUSE, SCENE9, None)
    })?;

    Ok(registry)
}

fn root_background() -> GameObject {
    GameObject::new_static("bg", WORLD)
        .with_texture(ROOT_BACKGROUND)
        .with_scaled_texture()
}

fn house1(texture: &str) -> GameObject {
    GameObject::new_static("house1", HOUSE1_RECT)
        .with_texture(texture)
        .with_z(1)
}

fn house2() -> GameObject {
    GameObject::new_static("house2", HOUSE2_RECT)
        .with_texture(HOUSE2_TEXTURE)
        .with_z(1)
}

fn front_door(inside: SceneKey) -> GameObject {
    GameObject::new_static("door", HOUSE1_RECT)
        .with_interactable(true)
        .with_next_scene(inside)
        .with_z(1)
}

fn idle_babay() -> GameObject {
    GameObject::new_static("babay", IDLE_BABAY_RECT)
        .with_texture(GRANDPA_TEXTURE)
        .with_z(1)
}

fn idle_flower() -> GameObject {
    GameObject::new_static("flower", FLOWER_RECT)
        .with_texture(FLOWER_TEXTURE)
        .with_z(1)
}

fn walking_scene(key: SceneKey, objects: Vec<GameObject>) -> Scene {
    Scene::new(key, OUTDOOR_SPAWN, WALKER_SIZE)
        .with_objects(objects)
        .with_interact_distance(INTERACT_DISTANCE)
}

fn dialog_scene(key: SceneKey, objects: Vec<GameObject>, npc_id: &str, player_size: Vec2) -> Scene {
    let mut scene = Scene::new(key, OFFSCREEN_SPAWN, player_size).with_objects(objects);
    scene.start_dialog_with(npc_id);
    scene
}

fn story_npc(
    id: &str,
    name: &str,
    rect: Rect,
    texture: &str,
    lines: Vec<DialogLine>,
    reward: Vec<InventoryItem>,
    next: SceneKey,
) -> GameObject {
    let dialog = NpcDialog::new(lines)
        .with_repeatable(false)
        .with_persist_progress(true)
        .with_reward(reward);
    GameObject::new_npc(id, rect, dialog)
        .with_name(name)
        .with_texture(texture)
        .with_next_scene(next)
        .with_z(1)
}

fn scene1() -> Scene {
    let babay = GameObject::new_static("babay", Rect::new(360.0, 212.0, 390.0, 255.0))
        .with_name("Бабай")
        .with_interactable(true)
        .with_next_scene(SCENE2)
        .with_texture("sprites/objects/grandpa_highlited.png")
        .with_z(1);
    walking_scene(
        SCENE1,
        vec![
            root_background(),
            house1(HOUSE1_TEXTURE),
            house2(),
            front_door(SCENE1_HOUSE),
            babay,
            idle_flower().with_name("Чәчәк"),
        ],
    )
}

fn scene2() -> Scene {
    let babay_big = story_npc(
        "babay_big",
        "Бабай",
        Rect::new(10.0, 70.0, 80.0, 225.0),
        GRANDPA_TEXTURE,
        vec![
            DialogLine::voiced("Сәлам!", "audios/babay/selem.ogg"),
            DialogLine::voiced("Мин бабай", "audios/babay/min_babay.ogg"),
        ],
        vec![InventoryItem::new("бабай", GRANDPA_TEXTURE)],
        SCENE3,
    );
    dialog_scene(
        SCENE2,
        vec![
            root_background(),
            house1(HOUSE1_TEXTURE),
            house2(),
            idle_flower(),
            babay_big,
        ],
        "babay_big",
        WALKER_SIZE,
    )
}

fn scene3() -> Scene {
    walking_scene(
        SCENE3,
        vec![
            root_background(),
            house1(HOUSE1_HIGHLIGHT),
            house2(),
            front_door(SCENE3_HOUSE),
            idle_babay(),
            idle_flower(),
        ],
    )
}

fn scene4() -> Scene {
    let ebi_big = story_npc(
        "ebi_big",
        "Әби",
        Rect::new(10.0, 70.0, 100.0, 225.0),
        GRANDMA_TEXTURE,
        vec![
            DialogLine::voiced("Исәнмесез!", "audios/ebi/isanmesez.ogg"),
            DialogLine::voiced("Миңа чәчәк тап", "audios/ebi/chechek_tap.ogg"),
        ],
        vec![
            InventoryItem::new("әби", GRANDMA_TEXTURE),
            InventoryItem::new("исәнмесез", "sprites/words/isanmesez.png"),
        ],
        SCENE5_HOUSE,
    );
    let background = GameObject::new_static("bg", WORLD)
        .with_texture(HOME_BACKGROUND)
        .with_scaled_texture();
    dialog_scene(SCENE4, vec![background, ebi_big], "ebi_big", WALKER_SIZE)
}

fn scene5() -> Scene {
    let flower = GameObject::new_static("flower", FLOWER_RECT)
        .with_name("Чәчәк")
        .with_interactable(true)
        .with_next_scene(SCENE6)
        .with_texture("sprites/objects/flower/flower_highlited.png")
        .with_z(1);
    walking_scene(
        SCENE5,
        vec![
            root_background(),
            house1(HOUSE1_TEXTURE),
            house2(),
            front_door(SCENE5_HOUSE),
            idle_babay(),
            flower,
        ],
    )
}

fn scene6() -> Scene {
    let flower_big = story_npc(
        "flower_big",
        "Чәчәк",
        Rect::new(208.0, 112.0, 278.0, 212.0),
        FLOWER_TEXTURE,
        vec![DialogLine::voiced("Чәчәк", "audios/flower/chechek.ogg")],
        vec![InventoryItem::new("чәчәк", FLOWER_TEXTURE)],
        SCENE7,
    );
    dialog_scene(
        SCENE6,
        vec![
            root_background(),
            house1(HOUSE1_TEXTURE),
            house2(),
            idle_babay(),
            flower_big,
        ],
        "flower_big",
        WALKER_SIZE,
    )
}

fn scene7() -> Scene {
    walking_scene(
        SCENE7,
        vec![
            root_background(),
            house1(HOUSE1_HIGHLIGHT),
            house2(),
            front_door(SCENE7_HOUSE),
            idle_babay(),
        ],
    )
}

fn scene8() -> Scene {
    let ebi_big = story_npc(
        "ebi_big_final",
        "Әби",
        Rect::new(10.0, 70.0, 100.0, 225.0),
        GRANDMA_TEXTURE,
        vec![DialogLine::voiced("Рәхмәт", "audios/ebi/raxmet.ogg")],
        vec![InventoryItem::new("рәхмәт", "sprites/words/rahmet.png")],
        SCENE9_HOUSE,
    );
    let background = GameObject::new_static("bg", WORLD)
        .with_texture(HOME_BACKGROUND)
        .with_scaled_texture();
    dialog_scene(
        SCENE8,
        vec![background, ebi_big],
        "ebi_big_final",
        Vec2::new(80.0, 80.0),
    )
}

fn scene9() -> Scene {
    // Free play after the quest: the neighbour's house teaches one more word.
    let house_word = ClickableObject::new(
        "house2_word",
        HOUSE2_RECT,
        InventoryItem::new("өй", HOUSE2_TEXTURE),
    )
    .with_z(2);
    walking_scene(
        SCENE9,
        vec![
            root_background(),
            house1(HOUSE1_TEXTURE),
            house2(),
            front_door(SCENE9_HOUSE),
            idle_babay(),
        ],
    )
    .with_clickable(house_word)
}

/// Grandma's living room. `next` makes grandma the way forward; without it
/// she is scenery and only the door leads anywhere.
fn house_scene(key: SceneKey, outside: SceneKey, next: Option<SceneKey>) -> Scene {
    let background = GameObject::new_static("bg", WORLD)
        .with_texture(HOME_BACKGROUND)
        .with_scaled_texture();
    let door = GameObject::new_static("door_exit", Rect::new(80.0, 100.0, 120.0, 160.0))
        .with_interactable(true)
        .with_next_scene(outside)
        .with_z(-1);
    let texture = if next.is_some() {
        "sprites/objects/grandma_highlited.png"
    } else {
        GRANDMA_TEXTURE
    };
    let mut ebi = GameObject::new_static("ebi", Rect::new(158.0, 208.0, 194.0, 264.0))
        .with_name("Әби")
        .with_interactable(next.is_some())
        .with_texture(texture)
        .with_z(1);
    ebi.next_scene = next;

    Scene::new(key, OUTDOOR_SPAWN, INDOOR_WALKER_SIZE)
        .with_objects([background, door, ebi])
        .with_interact_distance(INTERACT_DISTANCE)
        .with_player_z(2)
}
