//! Spatial selection handling
//!
//! This module normalizes request parameters into a typed selection:
//! either a bounding box or a polygon mask.

mod bbox;
mod params;
mod parser;
mod tests;

pub use self::bbox::{BoundingBox, Window};
pub use self::params::QueryParams;
pub use self::parser::{Selection, SelectionParser, BBOX_PARAM, GEOJSON_PARAM};
