//! Status classes and JSON response bodies
//!
//! Maps clip results to the status a transport layer should answer with.

use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::{ClipError, ClipResult};
use crate::api::ClipJob;

/// Message returned with a successful derivation
pub const SUCCESS_MESSAGE: &str = "Successfully clipping layer";

/// Response status class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    Success,
    BadRequest,
    /// Output exceeded the size limit
    Forbidden,
    NotFound,
    ServerError,
}

impl StatusClass {
    /// HTTP status code for this class
    pub fn code(&self) -> u16 {
        match self {
            StatusClass::Success => 200,
            StatusClass::BadRequest => 400,
            StatusClass::Forbidden => 403,
            StatusClass::NotFound => 404,
            StatusClass::ServerError => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        *self == StatusClass::Success
    }
}

impl ClipError {
    /// Status class this error surfaces as
    pub fn status_class(&self) -> StatusClass {
        match self {
            ClipError::MissingSelection
            | ClipError::LayerUnavailable(_)
            | ClipError::NoRasterFile(_)
            | ClipError::ExtractionFailed(_)
            | ClipError::ClipNotFound(_)
            | ClipError::InvalidClipFilename(_) => StatusClass::NotFound,
            ClipError::InvalidBoundingBox(_) => StatusClass::BadRequest,
            ClipError::SizeLimitExceeded { .. } => StatusClass::Forbidden,
            ClipError::IoError(_)
            | ClipError::ArchiveError(_)
            | ClipError::ConfigError(_)
            | ClipError::GenericError(_) => StatusClass::ServerError,
        }
    }
}

/// Structured result of a derive request
#[derive(Debug, Clone, Serialize)]
pub struct ClipResponse {
    pub status: StatusClass,
    pub body: Value,
}

impl ClipResponse {
    pub fn from_result(result: &ClipResult<ClipJob>) -> Self {
        match result {
            Ok(job) => ClipResponse {
                status: StatusClass::Success,
                body: json!({
                    "success": SUCCESS_MESSAGE,
                    "clip_filename": job.file_name,
                }),
            },
            Err(e) => ClipResponse {
                status: e.status_class(),
                body: json!({ "error": e.to_string() }),
            },
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status.code()
    }

    /// Body serialized as JSON text
    pub fn body_text(&self) -> String {
        self.body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ToolError;
    use std::path::PathBuf;

    #[test]
    fn test_success_body() {
        let job = ClipJob {
            file_name: "dem.tif.x.clip.tif".to_string(),
            path: PathBuf::from("/tmp/clipped/dem.tif.x.clip.tif"),
            size_bytes: 12,
            cache_hit: false,
        };
        let response = ClipResponse::from_result(&Ok(job));

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body["success"], SUCCESS_MESSAGE);
        assert_eq!(response.body["clip_filename"], "dem.tif.x.clip.tif");
    }

    #[test]
    fn test_size_rejection_body() {
        let response = ClipResponse::from_result(&Err(ClipError::SizeLimitExceeded {
            max_bytes: 5_000_000,
            actual_bytes: 6_000_000,
        }));

        assert_eq!(response.status, StatusClass::Forbidden);
        assert_eq!(response.status_code(), 403);
        assert_eq!(response.body_text(), r#"{"error":"Clipped file size is bigger than 5 mb"}"#);
    }

    #[test]
    fn test_status_classes() {
        assert_eq!(ClipError::MissingSelection.status_class(), StatusClass::NotFound);
        assert_eq!(ClipError::LayerUnavailable("x".into()).status_class(), StatusClass::NotFound);
        assert_eq!(
            ClipError::ExtractionFailed(ToolError::NoOutput(PathBuf::from("o"))).status_class(),
            StatusClass::NotFound
        );
        assert_eq!(ClipError::ClipNotFound("x".into()).status_class(), StatusClass::NotFound);
        assert_eq!(ClipError::InvalidBoundingBox("x".into()).status_class(), StatusClass::BadRequest);
        assert_eq!(ClipError::ConfigError("x".into()).status_class(), StatusClass::ServerError);
        assert!(!StatusClass::NotFound.is_success());
    }
}
