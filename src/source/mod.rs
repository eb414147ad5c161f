//! Layer to raster file resolution
//!
//! This module turns a layer name into the primary raster file and the
//! sidecar files stored next to it.

mod raster_source;
mod resolver;
mod locator;

pub use self::raster_source::{ExtensionTag, RasterSource};
pub use self::resolver::{DirectoryLayerResolver, LayerResolver, NoLayers, ResolveError};
pub use self::locator::SourceLocator;
