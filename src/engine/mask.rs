//! Mask file materialization

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use uuid::Uuid;

use crate::errors::ToolError;

/// File name of a materialized mask: `<basename>.<timestamp>.<unique>.geojson`
///
/// The unique part keeps concurrent requests on the same source and
/// second from sharing one mask file.
pub fn mask_file_name(basename: &str, timestamp: &str) -> String {
    format!("{}.{}.{}.geojson", basename, timestamp, Uuid::new_v4().simple())
}

/// Write the polygon text verbatim to `path`
pub fn materialize_mask(path: &Path, geojson: &str) -> Result<PathBuf, ToolError> {
    fs::write(path, geojson).map_err(|source| ToolError::MaskWrite { path: path.to_path_buf(), source })?;
    debug!("Materialized mask {} ({} bytes)", path.display(), geojson.len());
    Ok(path.to_path_buf())
}
