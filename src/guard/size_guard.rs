//! Rejects derived outputs above the configured size

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::errors::{ClipError, ClipResult};

/// Byte threshold for derived outputs
#[derive(Debug, Clone, Copy)]
pub struct SizeGuard {
    max_bytes: u64,
}

impl SizeGuard {
    pub fn new(max_bytes: u64) -> Self {
        SizeGuard { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Check the file at `path`, returning its size when it is within the limit
    ///
    /// An oversized file is left where it is.
    pub fn check(&self, path: &Path) -> ClipResult<u64> {
        let size = fs::metadata(path)?.len();
        debug!("{} is {} bytes (limit {})", path.display(), size, self.max_bytes);

        if size > self.max_bytes {
            warn!("Rejecting {}: {} bytes exceeds {}", path.display(), size, self.max_bytes);
            return Err(ClipError::SizeLimitExceeded {
                max_bytes: self.max_bytes,
                actual_bytes: size,
            });
        }
        Ok(size)
    }
}
