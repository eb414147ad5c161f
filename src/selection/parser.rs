//! Parse-once boundary from request parameters to a typed selection

use log::{debug, info, warn};

use crate::errors::{ClipError, ClipResult};
use super::bbox::BoundingBox;
use super::params::QueryParams;

/// Parameter carrying the bounding box
pub const BBOX_PARAM: &str = "BBOX";

/// Parameter carrying the polygon mask
pub const GEOJSON_PARAM: &str = "GEOJSON";

/// Spatial selection of a clip request
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Rectangular clip
    BoundingBox(BoundingBox),
    /// Cutline mask; raw GeoJSON text, not validated
    PolygonMask(String),
}

impl Selection {
    /// Suffix identifying the selection mode in output names
    pub fn tag(&self) -> &'static str {
        match self {
            Selection::BoundingBox(_) => "clip",
            Selection::PolygonMask(_) => "mask",
        }
    }

    /// Canonical selection text, stable for identical requests
    pub fn canonical(&self) -> String {
        match self {
            Selection::BoundingBox(bbox) => format!("bbox:{}", bbox.canonical()),
            Selection::PolygonMask(text) => format!("geojson:{}", text),
        }
    }
}

/// Turns request parameters into a [`Selection`]
pub struct SelectionParser;

impl SelectionParser {
    /// Parse the selection out of the request parameters
    ///
    /// `BBOX` is checked first, so it wins when both are present. Empty
    /// values count as absent.
    pub fn parse(params: &QueryParams) -> ClipResult<Selection> {
        if let Some(bbox_str) = params.get(BBOX_PARAM).filter(|s| !s.trim().is_empty()) {
            debug!("Parsing bbox parameter '{}'", bbox_str);
            let bbox = BoundingBox::from_string(bbox_str).map_err(|e| {
                warn!("Rejecting bbox '{}': {}", bbox_str, e);
                ClipError::InvalidBoundingBox(e)
            })?;
            info!("Selection is a bounding box: {:?}", bbox);
            return Ok(Selection::BoundingBox(bbox));
        }

        if let Some(geojson) = params.get(GEOJSON_PARAM).filter(|s| !s.trim().is_empty()) {
            info!("Selection is a polygon mask ({} bytes)", geojson.len());
            return Ok(Selection::PolygonMask(geojson.to_string()));
        }

        warn!("Request carries neither {} nor {}", BBOX_PARAM, GEOJSON_PARAM);
        Err(ClipError::MissingSelection)
    }
}
