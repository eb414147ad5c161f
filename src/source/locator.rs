//! Maps a layer name to its primary raster and sidecar files

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::errors::{ClipError, ClipResult};
use crate::utils::path_utils::{file_name_string, strip_workspace};
use super::raster_source::{ExtensionTag, RasterSource};
use super::resolver::LayerResolver;

/// Marker identifying the primary raster among a layer's files
const RASTER_MARKER: &str = ".tif";

/// Locates raster sources, falling back to pre-clipped artifacts
pub struct SourceLocator {
    resolver: Box<dyn LayerResolver>,
    fallback_directory: PathBuf,
}

impl SourceLocator {
    pub fn new(resolver: Box<dyn LayerResolver>, fallback_directory: PathBuf) -> Self {
        SourceLocator { resolver, fallback_directory }
    }

    /// Resolve `layer_name` to a [`RasterSource`]
    ///
    /// A successful lookup picks the first file whose name contains `.tif`.
    /// A failed lookup falls back to `<fallback>/<layer>.geotiff`.
    pub fn locate(&self, layer_name: &str) -> ClipResult<RasterSource> {
        match self.resolver.resolve(layer_name) {
            Ok(files) => {
                debug!("Layer {} resolved to {} files", layer_name, files.len());

                let raster_path = files.iter()
                    .find(|path| file_name_string(path).contains(RASTER_MARKER))
                    .cloned()
                    .ok_or_else(|| {
                        warn!("Layer {} has no raster file", layer_name);
                        ClipError::NoRasterFile(layer_name.to_string())
                    })?;

                info!("Primary raster for {}: {}", layer_name, raster_path.display());
                Ok(RasterSource {
                    layer_name: layer_name.to_string(),
                    raster_path,
                    extension: ExtensionTag::Tif,
                    sidecars: files,
                })
            },
            Err(e) => {
                let name = strip_workspace(layer_name);
                let fallback = self.fallback_directory.join(format!("{}.geotiff", name));
                info!("Lookup of {} failed ({}), trying {}", layer_name, e, fallback.display());

                if !fallback.is_file() {
                    warn!("No pre-clipped artifact for {}", layer_name);
                    return Err(ClipError::LayerUnavailable(layer_name.to_string()));
                }

                Ok(RasterSource {
                    layer_name: name.to_string(),
                    raster_path: fallback,
                    extension: ExtensionTag::GeoTiff,
                    sidecars: Vec::new(),
                })
            },
        }
    }
}
