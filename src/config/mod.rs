//! Runtime configuration
//!
//! Settings are loaded once from a TOML file and treated as read-only
//! by everything downstream.

mod settings;

pub use settings::{CacheKeyPolicy, Settings, ToolSettings};
