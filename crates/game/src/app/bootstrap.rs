use std::path::PathBuf;

use quest_engine::{RegistryError, SceneRegistry};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::save::JsonSaveStore;
use super::story;

const SAVE_PATH_ENV_VAR: &str = "CHECHEK_SAVE_PATH";
const MOVE_STEP_ENV_VAR: &str = "CHECHEK_MOVE_STEP";
const START_SCENE_ENV_VAR: &str = "CHECHEK_START_SCENE";

const DEFAULT_SAVE_PATH: &str = "data.json";
const DEFAULT_MOVE_STEP: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GameConfig {
    pub(crate) save_path: PathBuf,
    pub(crate) move_step: f32,
    pub(crate) start_scene: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            move_step: DEFAULT_MOVE_STEP,
            start_scene: story::START_SCENE.as_str().to_string(),
        }
    }
}

impl GameConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup(SAVE_PATH_ENV_VAR)) {
            config.save_path = PathBuf::from(raw);
        }
        if let Some(raw) = non_empty(lookup(MOVE_STEP_ENV_VAR)) {
            config.move_step = parse_move_step(&raw)?;
        }
        if let Some(raw) = non_empty(lookup(START_SCENE_ENV_VAR)) {
            config.start_scene = raw;
        }

        Ok(config)
    }
}

#[derive(Debug, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("{var} must be a positive finite number, got '{value}'")]
    InvalidMoveStep { var: &'static str, value: String },
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("scene graph setup failed: {0}")]
    Registry(#[from] RegistryError),
}

pub(crate) struct AppWiring {
    pub(crate) config: GameConfig,
    pub(crate) registry: SceneRegistry,
    pub(crate) store: JsonSaveStore,
}

pub(crate) fn build_app() -> Result<AppWiring, AppError> {
    init_tracing();
    info!("=== Chechek Quest Startup ===");

    let config = GameConfig::from_env()?;
    let registry = story::build_story_registry()?;
    let store = JsonSaveStore::new(config.save_path.clone());
    info!(
        save_path = %config.save_path.display(),
        move_step = config.move_step,
        start_scene = %config.start_scene,
        scenes = registry.keys().len(),
        "app_configured"
    );

    Ok(AppWiring {
        config,
        registry,
        store,
    })
}

// stdout carries driver output, so logs go to stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_move_step(raw: &str) -> Result<f32, ConfigError> {
    match raw.parse::<f32>() {
        Ok(step) if step.is_finite() && step > 0.0 => Ok(step),
        _ => Err(ConfigError::InvalidMoveStep {
            var: MOVE_STEP_ENV_VAR,
            value: raw.to_string(),
        }),
    }
}
