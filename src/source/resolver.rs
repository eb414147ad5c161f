//! Layer lookup boundary
//!
//! Permission checks and the layer catalogue live outside this crate. A
//! [`LayerResolver`] is the seam where they plug in; the directory-backed
//! resolver here serves the CLI and tests.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::utils::path_utils::{is_plain_file_name, strip_workspace};

/// Why a layer lookup failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    NotFound,
    Unauthorized,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotFound => write!(f, "layer not found"),
            ResolveError::Unauthorized => write!(f, "not permitted to view layer"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Authorized lookup of the files backing a layer
pub trait LayerResolver: Send + Sync {
    /// Return the file paths stored for `layer_name`
    fn resolve(&self, layer_name: &str) -> Result<Vec<PathBuf>, ResolveError>;
}

/// Resolver that never finds anything; every lookup goes to the fallback directory
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLayers;

impl LayerResolver for NoLayers {
    fn resolve(&self, _layer_name: &str) -> Result<Vec<PathBuf>, ResolveError> {
        Err(ResolveError::NotFound)
    }
}

/// Resolver mapping `<root>/<layer>/` to the regular files it contains
#[derive(Debug, Clone)]
pub struct DirectoryLayerResolver {
    root: PathBuf,
}

impl DirectoryLayerResolver {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        DirectoryLayerResolver { root: root.into() }
    }
}

impl LayerResolver for DirectoryLayerResolver {
    fn resolve(&self, layer_name: &str) -> Result<Vec<PathBuf>, ResolveError> {
        let name = strip_workspace(layer_name);
        if !is_plain_file_name(name) {
            return Err(ResolveError::NotFound);
        }

        let layer_dir = self.root.join(name);
        debug!("Listing layer directory {}", layer_dir.display());

        let entries = fs::read_dir(&layer_dir).map_err(|_| ResolveError::NotFound)?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(ResolveError::NotFound);
        }
        Ok(files)
    }
}
