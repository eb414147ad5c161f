pub mod errors;
pub mod config;
pub mod utils;
pub mod selection;
pub mod source;
pub mod cache;
pub mod engine;
pub mod guard;
pub mod archive;
pub mod preview;
pub mod response;
pub mod commands;
pub mod api;

pub use crate::api::{ClipJob, ClipService};

pub use errors::{ClipError, ClipResult, ToolError};
pub use selection::{BoundingBox, QueryParams, Selection};
pub use archive::ClipArchive;
pub use response::{ClipResponse, StatusClass};
