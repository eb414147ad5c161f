//! Derived output caching
//!
//! This module names derived outputs deterministically and stores them in
//! a shared, append-only cache directory.

mod key;
mod store;
mod tests;

pub use self::key::{selection_digest, OutputKey, OutputKeyDeriver};
pub use self::store::{Artifact, ArtifactStore, DiskArtifactStore};
