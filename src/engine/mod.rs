//! External extraction engine adapter
//!
//! This module runs the windowed extract and cutline mask operations
//! through external tools using a strategy pattern.

mod engine_strategy;
mod gdal_engine;
mod mask;
mod process;
mod tests;

pub use engine_strategy::{EngineFactory, ExtractionEngine};
pub use gdal_engine::GdalEngine;
pub use mask::{mask_file_name, materialize_mask};
pub use process::{run_tool, CancelFlag, ToolOutput};
