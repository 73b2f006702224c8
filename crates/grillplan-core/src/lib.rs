//! # Grillplan Core Library
//!
//! This library provides the core business logic for Grillplan, a grill
//! session planner built around one rule: everything comes off the grill
//! at the same moment. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary; any GUI would be
//! a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timeline**: Pure calculator that aligns a selection of items on a
//!   shared finish by delaying shorter items
//! - **Session**: Lowers a timeline to seconds and resolves live status,
//!   announcements and upcoming actions from elapsed time
//! - **Catalog**: Built-in grill items plus durable user-defined ones
//! - **Storage**: SQLite-based cook history and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Timeline`]: Schedule computation over a selection
//! - [`SessionClock`]: Elapsed-time to live-view resolver
//! - [`SessionRunner`]: Background one-second sampling loop
//! - [`Catalog`]: Grill item catalog with protected defaults
//! - [`Database`]: Cook history and key-value persistence

pub mod catalog;
pub mod error;
pub mod session;
pub mod storage;
pub mod timeline;

pub use catalog::{default_items, Catalog, GrillItem, ItemDraft, ItemKind, RemoveOutcome};
pub use error::{ConfigError, CoreError, DatabaseError, ItemValidationError};
pub use session::{
    ActionKind, ItemStatus, SessionClock, SessionHandle, SessionPlan, SessionRunner, SessionView,
};
pub use storage::{Config, CookRecord, CookStats, Database, KvStore};
pub use timeline::{ScheduledItem, Timeline};
