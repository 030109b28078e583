use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub word: String,
    #[serde(rename = "texturePath", alias = "texture_path")]
    pub texture_path: String,
}

impl InventoryItem {
    pub fn new(word: impl Into<String>, texture_path: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            texture_path: texture_path.into(),
        }
    }
}

/// Durable inventory owned outside the scene.
///
/// Every read goes back to the store; scenes never cache items.
pub trait InventoryStore {
    fn load_inventory(&self) -> Vec<InventoryItem>;

    /// Appends without checking for duplicates; callers dedupe first.
    fn add_inventory_item(&mut self, word: &str, texture_path: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryInventory {
    items: Vec<InventoryItem>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }
}

impl InventoryStore for InMemoryInventory {
    fn load_inventory(&self) -> Vec<InventoryItem> {
        self.items.clone()
    }

    fn add_inventory_item(&mut self, word: &str, texture_path: &str) {
        self.items.push(InventoryItem::new(word, texture_path));
    }
}

/// Appends `item` unless its word is already stored. Returns whether it was written.
pub fn grant_item(store: &mut dyn InventoryStore, item: &InventoryItem) -> bool {
    let current = store.load_inventory();
    if current.iter().any(|existing| existing.word == item.word) {
        debug!(word = %item.word, "inventory_item_already_owned");
        return false;
    }
    store.add_inventory_item(&item.word, &item.texture_path);
    info!(word = %item.word, "inventory_item_granted");
    true
}

pub fn grant_items(store: &mut dyn InventoryStore, items: &[InventoryItem]) -> usize {
    items
        .iter()
        .filter(|item| grant_item(store, item))
        .count()
}
