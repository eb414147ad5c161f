//! In-memory zip packaging of a clip and its sidecars

use std::fs::File;
use std::io::{self, Cursor};
use std::path::Path;

use log::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::ClipResult;
use crate::source::RasterSource;
use crate::utils::path_utils::file_name_string;

use super::sidecar::{select_sidecars, sidecar_entry_name};

/// MIME type of the produced archive
pub const ZIP_CONTENT_TYPE: &str = "application/x-zip-compressed";

/// A packaged download
#[derive(Debug, Clone)]
pub struct ClipArchive {
    /// `<layername>_clipped.zip`
    pub file_name: String,
    /// Zip bytes
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl ClipArchive {
    /// Value of the `Content-Disposition` header for this archive
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.file_name)
    }
}

/// Builds download archives
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchivePackager;

impl ArchivePackager {
    pub fn new() -> Self {
        ArchivePackager
    }

    /// Directory inside the archive, also the archive's base name
    pub fn subdirectory(layer_name: &str) -> String {
        format!("{}_clipped", layer_name)
    }

    /// Package `output` with the eligible sidecars of `source`
    ///
    /// # Arguments
    /// * `source` - Resolved source the clip was derived from
    /// * `output` - The derived clip file
    /// * `timestamp` - Generation timestamp embedded in sidecar names
    pub fn package(&self, source: &RasterSource, output: &Path, timestamp: &str) -> ClipResult<ClipArchive> {
        let subdir = Self::subdirectory(&source.layer_name);
        let original_extension = source.original_extension();
        let sidecars = select_sidecars(&source.sidecars, original_extension.as_deref());
        info!("Packaging {} with {} sidecars", output.display(), sidecars.len());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for sidecar in &sidecars {
            let entry = format!("{}/{}", subdir, sidecar_entry_name(sidecar, timestamp));
            debug!("Adding {} as {}", sidecar.display(), entry);
            zip.start_file(entry, options)?;
            io::copy(&mut File::open(sidecar)?, &mut zip)?;
        }

        let entry = format!("{}/{}", subdir, file_name_string(output));
        debug!("Adding clip as {}", entry);
        zip.start_file(entry, options)?;
        io::copy(&mut File::open(output)?, &mut zip)?;

        let bytes = zip.finish()?.into_inner();
        info!("Archive {}.zip is {} bytes", subdir, bytes.len());

        Ok(ClipArchive {
            file_name: format!("{}.zip", subdir),
            bytes,
            content_type: ZIP_CONTENT_TYPE,
        })
    }
}
