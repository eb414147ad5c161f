//! Extraction engine strategy definitions
//!
//! All pixel work is delegated to an external engine. This trait is the
//! seam between the clip pipeline and whatever performs the extraction.

use std::path::{Path, PathBuf};

use crate::config::ToolSettings;
use crate::errors::ToolError;
use crate::selection::Window;

use super::gdal_engine::GdalEngine;
use super::process::CancelFlag;

/// Strategy for running raster extractions
pub trait ExtractionEngine: Send + Sync {
    /// Extract the rectangular `window` of `source` into `output`
    ///
    /// Raising `cancel` stops this run only.
    ///
    /// # Returns
    /// The output path, which exists on success
    fn windowed_extract(
        &self,
        source: &Path,
        window: &Window,
        output: &Path,
        cancel: &CancelFlag,
    ) -> Result<PathBuf, ToolError>;

    /// Mask `source` with the polygon in `mask_file`, cropping to it and
    /// adding an alpha band
    ///
    /// # Returns
    /// The output path, which exists on success
    fn cutline_mask(
        &self,
        source: &Path,
        mask_file: &Path,
        output: &Path,
        cancel: &CancelFlag,
    ) -> Result<PathBuf, ToolError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Factory for creating extraction engines
pub struct EngineFactory;

impl EngineFactory {
    /// Create the engine described by `tools`
    pub fn create(tools: &ToolSettings) -> Box<dyn ExtractionEngine> {
        Box::new(GdalEngine::from_settings(tools))
    }
}
