//! Custom error types for clip derivation and packaging

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Failure reported by the external extraction tool
#[derive(Debug)]
pub enum ToolError {
    /// The tool binary could not be started
    Spawn { program: String, source: io::Error },
    /// The tool exited with a non-zero status
    Failed { program: String, code: Option<i32>, stderr: String },
    /// The tool ran past its deadline and was killed
    TimedOut { program: String, after: Duration },
    /// The invocation was cancelled and the child killed
    Cancelled { program: String },
    /// The tool reported success but left no output file
    NoOutput(PathBuf),
    /// The mask file could not be materialized
    MaskWrite { path: PathBuf, source: io::Error },
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Spawn { program, source } => write!(f, "failed to start '{}': {}", program, source),
            ToolError::Failed { program, code, stderr } => {
                match code {
                    Some(c) => write!(f, "'{}' exited with status {}", program, c)?,
                    None => write!(f, "'{}' was terminated by a signal", program)?,
                }
                let detail = stderr.trim();
                if !detail.is_empty() {
                    write!(f, ": {}", detail)?;
                }
                Ok(())
            },
            ToolError::TimedOut { program, after } => write!(f, "'{}' timed out after {:?}", program, after),
            ToolError::Cancelled { program } => write!(f, "'{}' was cancelled", program),
            ToolError::NoOutput(path) => write!(f, "no output produced at {}", path.display()),
            ToolError::MaskWrite { path, source } => write!(f, "cannot write mask file {}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for ToolError {}

/// Errors raised while deriving, caching or packaging a clip
#[derive(Debug)]
pub enum ClipError {
    /// I/O error
    IoError(io::Error),
    /// Neither a bounding box nor a polygon mask was supplied
    MissingSelection,
    /// The bounding box parameter could not be parsed
    InvalidBoundingBox(String),
    /// The layer could not be resolved and no pre-clipped artifact exists
    LayerUnavailable(String),
    /// The layer resolved but none of its files is a raster
    NoRasterFile(String),
    /// The extraction tool produced no output
    ExtractionFailed(ToolError),
    /// The derived output is larger than the configured maximum
    SizeLimitExceeded { max_bytes: u64, actual_bytes: u64 },
    /// A requested clip file does not exist in the cache
    ClipNotFound(String),
    /// A requested clip file name is not a plain file name
    InvalidClipFilename(String),
    /// Zip archive assembly failed
    ArchiveError(zip::result::ZipError),
    /// Configuration could not be loaded
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl ClipError {
    /// Configured maximum in whole megabytes, as shown to clients
    pub fn max_megabytes(max_bytes: u64) -> u64 {
        max_bytes / 1_000_000
    }
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipError::IoError(e) => write!(f, "I/O error: {}", e),
            ClipError::MissingSelection => write!(f, "No bbox or geojson in parameters."),
            ClipError::InvalidBoundingBox(msg) => write!(f, "Invalid bbox: {}", msg),
            ClipError::LayerUnavailable(layer) => write!(f, "Layer not available: {}", layer),
            ClipError::NoRasterFile(_) => write!(f, "Project can not be clipped or masked."),
            ClipError::ExtractionFailed(_) => write!(f, "Project can not be clipped or masked."),
            ClipError::SizeLimitExceeded { max_bytes, .. } => {
                write!(f, "Clipped file size is bigger than {} mb", ClipError::max_megabytes(*max_bytes))
            },
            ClipError::ClipNotFound(_) => write!(f, "Project can not be clipped or masked."),
            ClipError::InvalidClipFilename(name) => write!(f, "Invalid clip filename: {}", name),
            ClipError::ArchiveError(e) => write!(f, "Archive error: {}", e),
            ClipError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ClipError::GenericError(msg) => write!(f, "Clip error: {}", msg),
        }
    }
}

impl std::error::Error for ClipError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClipError::IoError(e) => Some(e),
            ClipError::ExtractionFailed(e) => Some(e),
            ClipError::ArchiveError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ClipError {
    fn from(error: io::Error) -> Self {
        ClipError::IoError(error)
    }
}

impl From<ToolError> for ClipError {
    fn from(error: ToolError) -> Self {
        ClipError::ExtractionFailed(error)
    }
}

impl From<zip::result::ZipError> for ClipError {
    fn from(error: zip::result::ZipError) -> Self {
        ClipError::ArchiveError(error)
    }
}

impl From<toml::de::Error> for ClipError {
    fn from(error: toml::de::Error) -> Self {
        ClipError::ConfigError(error.to_string())
    }
}

impl From<String> for ClipError {
    fn from(msg: String) -> Self {
        ClipError::GenericError(msg)
    }
}

/// Result type for clip operations
pub type ClipResult<T> = Result<T, ClipError>;
