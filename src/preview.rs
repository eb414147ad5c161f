//! Preview page context
//!
//! Only the data a preview page needs is built here; rendering it is the
//! front end's job.

use serde::Serialize;

/// Workspace under which published rasters are served
pub const WORKSPACE: &str = "geonode";

/// Data referenced by a raster preview page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewContext {
    pub geotiff_name: String,
    /// Tile URL template with `{z}`, `{x}` and `{y}` placeholders
    pub tiles_url: String,
    pub service_typename: String,
}

impl PreviewContext {
    /// Build the context for `geotiff_name` served from `public_base`
    ///
    /// `public_base` is used as given and is expected to end with a slash.
    pub fn new(public_base: &str, geotiff_name: &str) -> Self {
        PreviewContext {
            geotiff_name: geotiff_name.to_string(),
            tiles_url: format!(
                "{}gwc/service/gmaps?layers={}:{}&zoom={{z}}&x={{x}}&y={{y}}&format=image/png8",
                public_base, WORKSPACE, geotiff_name
            ),
            service_typename: format!("{}:{}", WORKSPACE, geotiff_name),
        }
    }
}
