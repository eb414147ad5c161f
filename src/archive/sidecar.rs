//! Sidecar selection and renaming

use std::path::PathBuf;

use log::debug;

use crate::utils::path_utils::{embed_timestamp, file_name_string};

/// Extension of project files, never shipped
pub const PROJECT_EXTENSION: &str = ".qgs";

/// Sidecars eligible for the archive
///
/// Drops project files and any file sharing the original raster's
/// extension, so the un-clipped raster never ends up in the bundle.
pub fn select_sidecars(sidecars: &[PathBuf], original_extension: Option<&str>) -> Vec<PathBuf> {
    sidecars.iter()
        .filter(|path| {
            let name = file_name_string(path);
            let excluded = name.ends_with(PROJECT_EXTENSION)
                || original_extension.is_some_and(|ext| name.ends_with(ext));
            if excluded {
                debug!("Leaving {} out of the archive", name);
            }
            !excluded
        })
        .cloned()
        .collect()
}

/// Name of a sidecar inside the archive, with the generation timestamp embedded
pub fn sidecar_entry_name(sidecar: &std::path::Path, timestamp: &str) -> String {
    embed_timestamp(&file_name_string(sidecar), timestamp)
}
