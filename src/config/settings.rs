//! Settings structure and TOML loading

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;

use crate::errors::{ClipError, ClipResult};

/// Default maximum clip size (100 MB)
const DEFAULT_MAXIMUM_CLIP_SIZE: u64 = 100_000_000;

/// Fallback artifact directory under `temp_root` when none is configured
const DEFAULT_FALLBACK_SUBDIR: &str = "clipped_layers";

/// Default deadline for one external tool run
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 300;

/// How derived output names are keyed in the cache directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKeyPolicy {
    /// `<basename>.<digest>.<tag>.<ext>`; identical requests share one file
    Content,
    /// `<basename>.<timestamp>.<tag>.<ext>`; requests collapse only within one second
    Timestamp,
}

impl Default for CacheKeyPolicy {
    fn default() -> Self {
        CacheKeyPolicy::Content
    }
}

/// External tool configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Binary used for windowed extracts
    pub gdal_translate: PathBuf,
    /// Binary used for cutline masks
    pub gdalwarp: PathBuf,
    /// Execution deadline for one invocation, in seconds
    pub timeout_secs: u64,
}

impl ToolSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        ToolSettings {
            gdal_translate: PathBuf::from("gdal_translate"),
            gdalwarp: PathBuf::from("gdalwarp"),
            timeout_secs: DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }
}

/// Settings consumed by the clip service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum size of a derived output, in bytes
    pub maximum_clip_size: u64,
    /// Public base location of the tile service, with trailing slash
    pub geoserver_public_location: String,
    /// Directory holding pre-clipped `<layer>.geotiff` artifacts;
    /// `<temp_root>/clipped_layers` when unset
    pub clipped_directory: Option<PathBuf>,
    /// Root under which the `clipped` cache directory lives
    pub temp_root: PathBuf,
    /// Root of the directory-backed layer store, if any
    pub layers_directory: Option<PathBuf>,
    /// Cache key policy for derived outputs
    pub cache_key: CacheKeyPolicy,
    /// External tool settings
    pub tools: ToolSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            maximum_clip_size: DEFAULT_MAXIMUM_CLIP_SIZE,
            geoserver_public_location: "http://localhost:8080/geoserver/".to_string(),
            clipped_directory: None,
            temp_root: std::env::temp_dir(),
            layers_directory: None,
            cache_key: CacheKeyPolicy::default(),
            tools: ToolSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> ClipResult<Self> {
        let settings: Settings = toml::from_str(content)?;
        debug!("Parsed settings: {:?}", settings);
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ClipResult<Self> {
        let path = path.as_ref();
        info!("Loading settings from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            ClipError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Directory searched for pre-clipped artifacts when a layer lookup fails
    pub fn fallback_directory(&self) -> PathBuf {
        self.clipped_directory.clone()
            .unwrap_or_else(|| self.temp_root.join(DEFAULT_FALLBACK_SUBDIR))
    }

    /// Directory where derived outputs and mask files are written
    pub fn cache_directory(&self) -> PathBuf {
        self.temp_root.join("clipped")
    }
}
