//! Grill item catalog: definitions, validation and durable custom items.

mod item;
mod store;

pub use item::{GrillItem, ItemDraft, ItemKind, MIN_COOK_TIME_MIN};
pub use store::{default_items, Catalog, RemoveOutcome, CUSTOM_ITEMS_KEY};
