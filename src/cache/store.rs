//! Disk-backed artifact store
//!
//! Outputs are looked up by existence only. Creation of one key is
//! serialized with a per-key lock so concurrent misses on the same key
//! run the generator once.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};

use crate::errors::{ClipError, ClipResult, ToolError};
use crate::utils::path_utils::is_plain_file_name;

/// A stored artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    /// `false` when the artifact already existed
    pub created: bool,
}

/// Key-value store of derived artifacts
pub trait ArtifactStore: Send + Sync {
    /// Path of the artifact stored under `key`, if it exists
    fn lookup(&self, key: &str) -> Option<PathBuf>;

    /// Return the artifact under `key`, running `generate` to create it on a miss
    ///
    /// `generate` receives the path it must write. The check and the
    /// generation happen under one per-key lock.
    fn get_or_create(
        &self,
        key: &str,
        generate: &mut dyn FnMut(&Path) -> ClipResult<()>,
    ) -> ClipResult<Artifact>;

    /// Path for an auxiliary file next to the artifacts
    fn scratch_path(&self, name: &str) -> PathBuf;
}

/// Artifact store rooted at a cache directory
pub struct DiskArtifactStore {
    root: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DiskArtifactStore {
    /// Open the store, creating `root` if needed
    pub fn new<P: Into<PathBuf>>(root: P) -> ClipResult<Self> {
        let root = root.into();
        match fs::create_dir_all(&root) {
            Ok(()) => {},
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {},
            Err(e) => return Err(ClipError::IoError(e)),
        }
        debug!("Artifact store at {}", root.display());

        Ok(DiskArtifactStore {
            root,
            locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn release(&self, key: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the map and this caller hold it: nobody else is waiting
        if Arc::strong_count(&lock) == 2 {
            locks.remove(key);
        }
    }

    fn check_or_generate(
        &self,
        path: PathBuf,
        generate: &mut dyn FnMut(&Path) -> ClipResult<()>,
    ) -> ClipResult<Artifact> {
        if path.is_file() {
            info!("Cache hit for {}", path.display());
            return Ok(Artifact { path, created: false });
        }

        info!("Cache miss for {}, generating", path.display());
        if let Err(e) = generate(&path) {
            // A killed or failed tool may leave a truncated file behind
            if path.exists() {
                warn!("Removing partial output {}", path.display());
                if let Err(rm) = fs::remove_file(&path) {
                    warn!("Could not remove {}: {}", path.display(), rm);
                }
            }
            return Err(e);
        }

        if !path.is_file() {
            return Err(ClipError::ExtractionFailed(ToolError::NoOutput(path)));
        }
        Ok(Artifact { path, created: true })
    }
}

impl ArtifactStore for DiskArtifactStore {
    fn lookup(&self, key: &str) -> Option<PathBuf> {
        if !is_plain_file_name(key) {
            return None;
        }
        let path = self.root.join(key);
        path.is_file().then_some(path)
    }

    fn get_or_create(
        &self,
        key: &str,
        generate: &mut dyn FnMut(&Path) -> ClipResult<()>,
    ) -> ClipResult<Artifact> {
        if !is_plain_file_name(key) {
            return Err(ClipError::InvalidClipFilename(key.to_string()));
        }

        let lock = self.key_lock(key);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.check_or_generate(self.root.join(key), generate)
        };
        self.release(key, lock);
        result
    }

    fn scratch_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
