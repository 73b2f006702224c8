//! The grill item catalog: built-in defaults plus custom entries.
//!
//! The catalog always starts from the built-in default items and overlays
//! custom entries loaded from a [`KvStore`] slot. Defaults are protected:
//! they are reconstituted identically on every load and can never be
//! removed. Only the custom entries are persisted.

use uuid::Uuid;

use crate::error::{ItemValidationError, Result};
use crate::storage::KvStore;

use super::item::{GrillItem, ItemDraft, ItemKind};

/// Key of the durable slot holding custom catalog entries (a JSON array).
pub const CUSTOM_ITEMS_KEY: &str = "custom_items";

/// Outcome of a removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The custom item existed and was removed.
    Removed,
    /// The id names a built-in default; the catalog is unchanged.
    Protected,
    /// No item with this id exists.
    NotFound,
}

/// The built-in default catalog.
pub fn default_items() -> Vec<GrillItem> {
    vec![
        item("maissi", "Maissi", ItemKind::Veggie, 3.0, None, 8, "6-8 kääntöä"),
        item("parsa", "Parsa", ItemKind::Veggie, 3.5, None, 2, ""),
        item(
            "pekonisienet",
            "Pekonisienet",
            ItemKind::Veggie,
            5.0,
            None,
            2,
            "+2min isoille sienille",
        ),
        item("kana", "Kana", ItemKind::Meat, 5.0, None, 2, ""),
        item("ulkofile", "Ulkofile", ItemKind::Meat, 2.5, None, 2, ""),
        item("salaatti", "Salaatti", ItemKind::Veggie, 2.0, None, 1, ""),
        item("lohi", "Lohi", ItemKind::Fish, 3.0, Some(5.0), 2, "muista öljy"),
        item("makkara", "Makkara", ItemKind::Meat, 6.0, None, 2, ""),
    ]
}

fn item(
    id: &str,
    name: &str,
    kind: ItemKind,
    per_side: f64,
    second_side: Option<f64>,
    sides: u32,
    notes: &str,
) -> GrillItem {
    GrillItem {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        cook_time_per_side: per_side,
        cook_time_second_side: second_side,
        sides,
        notes: notes.to_string(),
    }
}

fn is_default_id(id: &str) -> bool {
    default_items().iter().any(|d| d.id == id)
}

/// Grill item catalog backed by a durable custom slot.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<GrillItem>,
}

impl Catalog {
    /// Catalog holding only the built-in defaults.
    pub fn with_defaults() -> Self {
        Self {
            items: default_items(),
        }
    }

    /// Load the catalog from a durable store.
    ///
    /// Custom entries come from the [`CUSTOM_ITEMS_KEY`] slot. A missing,
    /// unreadable or corrupt slot degrades to the defaults alone rather
    /// than failing.
    pub fn load(store: &dyn KvStore) -> Self {
        let mut catalog = Self::with_defaults();
        match store.kv_get(CUSTOM_ITEMS_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<GrillItem>>(&json) {
                Ok(custom) => {
                    // A tampered slot could shadow a default id; drop those.
                    catalog
                        .items
                        .extend(custom.into_iter().filter(|i| !is_default_id(&i.id)));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "corrupt custom item slot, using default catalog");
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to read custom item slot, using default catalog");
            }
        }
        catalog
    }

    /// Persist the custom entries back to the durable store.
    ///
    /// Defaults are never written; they are rebuilt on every load.
    pub fn save(&self, store: &dyn KvStore) -> Result<()> {
        let custom: Vec<&GrillItem> = self.custom().collect();
        let json = serde_json::to_string(&custom)?;
        store.kv_set(CUSTOM_ITEMS_KEY, &json)?;
        Ok(())
    }

    /// All items, defaults first, then custom entries in insertion order.
    pub fn list(&self) -> &[GrillItem] {
        &self.items
    }

    /// Look up one item by id.
    pub fn get(&self, id: &str) -> Option<&GrillItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Custom (non-default) entries only.
    pub fn custom(&self) -> impl Iterator<Item = &GrillItem> {
        self.items.iter().filter(|i| !is_default_id(&i.id))
    }

    /// Validate a draft and add it under a fresh unique id.
    pub fn add(&mut self, draft: ItemDraft) -> Result<GrillItem, ItemValidationError> {
        draft.validate()?;
        let item = GrillItem {
            id: format!("custom-{}", Uuid::new_v4()),
            name: draft.name,
            kind: draft.kind,
            cook_time_per_side: draft.cook_time_per_side,
            cook_time_second_side: draft.cook_time_second_side,
            sides: draft.sides,
            notes: draft.notes,
        };
        self.items.push(item.clone());
        Ok(item)
    }

    /// Remove a custom item by id. Built-in defaults are protected and
    /// removing them leaves the catalog unchanged.
    pub fn remove(&mut self, id: &str) -> RemoveOutcome {
        if is_default_id(id) {
            return RemoveOutcome::Protected;
        }
        match self.items.iter().position(|i| i.id == id) {
            Some(pos) => {
                self.items.remove(pos);
                RemoveOutcome::Removed
            }
            None => RemoveOutcome::NotFound,
        }
    }
}
