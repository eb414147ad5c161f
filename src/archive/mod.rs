//! Download archive assembly
//!
//! Bundles a derived clip with its eligible sidecar files into a single
//! in-memory zip.

mod packager;
mod sidecar;
mod tests;

pub use self::packager::{ArchivePackager, ClipArchive, ZIP_CONTENT_TYPE};
pub use self::sidecar::{select_sidecars, sidecar_entry_name, PROJECT_EXTENSION};
