//! Resolved raster source description

use std::fmt;
use std::path::{Path, PathBuf};

use crate::utils::path_utils::file_name_string;

/// Extension tag carried into derived output names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionTag {
    /// Raster found through the layer lookup
    Tif,
    /// Pre-clipped artifact from the fallback directory
    GeoTiff,
}

impl ExtensionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionTag::Tif => "tif",
            ExtensionTag::GeoTiff => "geotiff",
        }
    }
}

impl fmt::Display for ExtensionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A layer resolved to its backing files
#[derive(Debug, Clone)]
pub struct RasterSource {
    /// Layer name used for archive naming
    pub layer_name: String,
    /// Primary raster file
    pub raster_path: PathBuf,
    /// Extension tag of the primary raster
    pub extension: ExtensionTag,
    /// Every file the layer lookup returned, the primary raster included.
    /// Empty for fallback artifacts.
    pub sidecars: Vec<PathBuf>,
}

impl RasterSource {
    /// File name of the primary raster
    pub fn basename(&self) -> String {
        file_name_string(&self.raster_path)
    }

    /// Extension of the primary raster file (with leading dot) when it came
    /// from the layer lookup
    ///
    /// Sidecars sharing this extension are copies of the un-clipped raster.
    pub fn original_extension(&self) -> Option<String> {
        if self.extension != ExtensionTag::Tif {
            return None;
        }
        Path::new(&self.raster_path)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
    }
}
