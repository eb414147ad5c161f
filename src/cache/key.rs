//! Deterministic output naming

use log::debug;
use sha2::{Digest, Sha256};

use crate::config::CacheKeyPolicy;
use crate::selection::Selection;
use crate::source::RasterSource;

/// Number of hex digits of the selection digest kept in file names
const DIGEST_HEX_LEN: usize = 16;

/// Name of a derived output inside the cache directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputKey {
    /// Output file name, used as the cache key
    pub file_name: String,
    /// Generation timestamp the key was derived at
    pub timestamp: String,
}

/// Computes output file names from source, selection and time
#[derive(Debug, Clone, Copy)]
pub struct OutputKeyDeriver {
    policy: CacheKeyPolicy,
}

impl OutputKeyDeriver {
    pub fn new(policy: CacheKeyPolicy) -> Self {
        OutputKeyDeriver { policy }
    }

    pub fn policy(&self) -> CacheKeyPolicy {
        self.policy
    }

    /// Derive the output key
    ///
    /// `timestamp` policy: `<basename>.<timestamp>.<tag>.<ext>`.
    /// `content` policy: `<basename>.<digest>.<tag>.<ext>`.
    pub fn derive(&self, source: &RasterSource, selection: &Selection, timestamp: &str) -> OutputKey {
        let discriminator = match self.policy {
            CacheKeyPolicy::Timestamp => timestamp.to_string(),
            CacheKeyPolicy::Content => selection_digest(source, selection),
        };

        let file_name = format!(
            "{}.{}.{}.{}",
            source.basename(),
            discriminator,
            selection.tag(),
            source.extension
        );
        debug!("Derived output key {} ({:?})", file_name, self.policy);

        OutputKey {
            file_name,
            timestamp: timestamp.to_string(),
        }
    }
}

/// Truncated SHA-256 over source identity and selection contents
pub fn selection_digest(source: &RasterSource, selection: &Selection) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.raster_path.to_string_lossy().as_bytes());
    hasher.update([0u8]);
    hasher.update(source.extension.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(selection.canonical().as_bytes());

    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(DIGEST_HEX_LEN);
    hex
}
