use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quest_engine::{InventoryItem, InventoryStore};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// On-disk save layout: `{ "scene": ..., "inventory": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SaveData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) scene: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) inventory: Vec<InventoryItem>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<InventoryItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<InventoryItem>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Error)]
pub(crate) enum SaveError {
    #[error("failed to read save '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write save '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse save '{path}'{location}: {source}")]
    Parse {
        path: PathBuf,
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode save: {0}")]
    Encode(#[source] serde_json::Error),
}

/// JSON file holding the last scene and the inventory.
///
/// Nothing is cached: every inventory read goes back to disk and every grant
/// is written immediately.
#[derive(Debug, Clone)]
pub(crate) struct JsonSaveStore {
    path: PathBuf,
}

impl JsonSaveStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn load_game(&self) -> Result<SaveData, SaveError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "save_missing");
                return Ok(SaveData::default());
            }
            Err(source) => {
                return Err(SaveError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(SaveData::default());
        }
        parse_save_json(&raw).map_err(|(json_path, source)| SaveError::Parse {
            path: self.path.clone(),
            location: if json_path.is_empty() || json_path == "." {
                String::new()
            } else {
                format!(" at {json_path}")
            },
            source,
        })
    }

    /// Moves an unreadable save to `<name>.bak` so the next write starts clean.
    pub(crate) fn set_aside(&self) -> Result<PathBuf, SaveError> {
        let backup = sibling_with_suffix(&self.path, ".bak");
        fs::rename(&self.path, &backup).map_err(|source| SaveError::Write {
            path: backup.clone(),
            source,
        })?;
        Ok(backup)
    }

    /// Records `scene` as the last active scene. `None` keeps the stored inventory.
    pub(crate) fn save_game(
        &self,
        scene: &str,
        inventory: Option<Vec<InventoryItem>>,
    ) -> Result<(), SaveError> {
        let inventory = match inventory {
            Some(items) => items,
            None => self.load_game()?.inventory,
        };
        self.write(&SaveData {
            scene: Some(scene.to_string()),
            inventory,
        })
    }

    fn write(&self, data: &SaveData) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(data).map_err(SaveError::Encode)?;
        write_text_atomic(&self.path, &json).map_err(|source| SaveError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl InventoryStore for JsonSaveStore {
    fn load_inventory(&self) -> Vec<InventoryItem> {
        match self.load_game() {
            Ok(data) => data.inventory,
            Err(error) => {
                warn!(%error, "inventory_load_failed");
                Vec::new()
            }
        }
    }

    fn add_inventory_item(&mut self, word: &str, texture_path: &str) {
        let mut data = match self.load_game() {
            Ok(data) => data,
            Err(error) => {
                warn!(%error, word, "inventory_write_skipped");
                return;
            }
        };
        data.inventory.push(InventoryItem::new(word, texture_path));
        if let Err(error) = self.write(&data) {
            warn!(%error, word, "inventory_write_failed");
        }
    }
}

fn parse_save_json(raw: &str) -> Result<SaveData, (String, serde_json::Error)> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, SaveData>(&mut deserializer).map_err(|error| {
        let path = error.path().to_string();
        (path, error.into_inner())
    })
}

/// Writes a sibling staging file and renames it over `path`, so readers never
/// observe a half-written save.
fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let staging = sibling_with_suffix(path, ".tmp");
    fs::write(&staging, text)?;
    if let Err(error) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(error);
    }
    Ok(())
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("data.json"));
    name.push(suffix);
    path.with_file_name(name)
}
