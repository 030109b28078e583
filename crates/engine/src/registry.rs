use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::scene::{Scene, SceneKey};

pub type SceneFactory = Box<dyn Fn() -> Scene>;

/// Per-node memoization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Every visit builds the scene from scratch.
    Fresh,
    /// First visit builds the scene; later visits get the same instance back.
    Singleton,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown scene '{0}'")]
    UnknownScene(String),
    #[error("scene '{0}' is already registered")]
    DuplicateScene(SceneKey),
    #[error("singleton scene '{0}' is already active")]
    AlreadyActive(SceneKey),
}

struct SceneNode {
    factory: SceneFactory,
    persistence: Persistence,
    cached: Option<Scene>,
    checked_out: bool,
}

/// Named scene factories forming the storyline graph.
///
/// The active scene is owned by the driver. Singleton scenes are checked out
/// by `get_or_create` and must be handed back with `park` when the driver
/// leaves them.
#[derive(Default)]
pub struct SceneRegistry {
    nodes: HashMap<SceneKey, SceneNode>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(
        &mut self,
        key: SceneKey,
        persistence: Persistence,
        factory: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn() -> Scene + 'static,
    {
        if self.nodes.contains_key(&key) {
            return Err(RegistryError::DuplicateScene(key));
        }
        self.nodes.insert(
            key,
            SceneNode {
                factory: Box::new(factory),
                persistence,
                cached: None,
                checked_out: false,
            },
        );
        Ok(())
    }

    pub fn contains(&self, key: SceneKey) -> bool {
        self.nodes.contains_key(&key)
    }

    pub fn persistence(&self, key: SceneKey) -> Option<Persistence> {
        self.nodes.get(&key).map(|node| node.persistence)
    }

    pub fn is_cached(&self, key: SceneKey) -> bool {
        self.nodes
            .get(&key)
            .is_some_and(|node| node.cached.is_some())
    }

    pub fn resolve(&self, name: &str) -> Option<SceneKey> {
        self.nodes.keys().copied().find(|key| key.as_str() == name)
    }

    pub fn keys(&self) -> Vec<SceneKey> {
        let mut keys: Vec<SceneKey> = self.nodes.keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn get_or_create(&mut self, key: SceneKey) -> Result<Scene, RegistryError> {
        let node = self
            .nodes
            .get_mut(&key)
            .ok_or_else(|| RegistryError::UnknownScene(key.to_string()))?;

        match node.persistence {
            Persistence::Fresh => Ok(build(key, &node.factory)),
            Persistence::Singleton => {
                if node.checked_out {
                    return Err(RegistryError::AlreadyActive(key));
                }
                let scene = match node.cached.take() {
                    Some(scene) => {
                        debug!(scene = %key, "scene_reused");
                        scene
                    }
                    None => build(key, &node.factory),
                };
                node.checked_out = true;
                Ok(scene)
            }
        }
    }

    pub fn get_or_create_by_name(&mut self, name: &str) -> Result<Scene, RegistryError> {
        let key = self
            .resolve(name)
            .ok_or_else(|| RegistryError::UnknownScene(name.to_string()))?;
        self.get_or_create(key)
    }

    /// Takes back a scene the driver is leaving. Singletons are cached with
    /// any unfinished dialog dropped; fresh scenes are discarded.
    pub fn park(&mut self, mut scene: Scene) {
        let key = scene.key();
        let Some(node) = self.nodes.get_mut(&key) else {
            warn!(scene = %key, "park_unknown_scene");
            return;
        };
        if node.persistence == Persistence::Singleton {
            scene.abandon_dialog();
            node.cached = Some(scene);
            node.checked_out = false;
        }
    }
}

fn build(key: SceneKey, factory: &SceneFactory) -> Scene {
    let scene = factory();
    if scene.key() != key {
        warn!(expected = %key, actual = %scene.key(), "scene_factory_key_mismatch");
    }
    debug!(scene = %key, "scene_built");
    scene
}
