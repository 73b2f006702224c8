pub mod completions;
pub mod config;
pub mod cook;
pub mod history;
pub mod item;
pub mod plan;
