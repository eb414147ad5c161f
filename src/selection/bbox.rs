//! Bounding box and projection window structures

use std::fmt;

/// A geographic bounding box in standard (west, south, east, north) order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub west: f64,
    /// Minimum Y coordinate
    pub south: f64,
    /// Maximum X coordinate
    pub east: f64,
    /// Maximum Y coordinate
    pub north: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        BoundingBox { west, south, east, north }
    }

    /// Parse a bounding box from a string (format: "west,south,east,north")
    ///
    /// Fields are taken in the order received; no min/max normalization
    /// is applied.
    pub fn from_string(bbox_str: &str) -> Result<Self, String> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        let [west, south, east, north] = parts.as_slice() else {
            return Err(format!("expected 4 comma-separated values, got {}", parts.len()));
        };

        Ok(BoundingBox::new(
            parse_field(west, "west")?,
            parse_field(south, "south")?,
            parse_field(east, "east")?,
            parse_field(north, "north")?,
        ))
    }

    /// Window handed to the windowed extract
    ///
    /// The extract expects the upper-left corner first, so the vertical
    /// axis is swapped: (west, north, east, south).
    pub fn projection_window(&self) -> Window {
        Window {
            ulx: self.west,
            uly: self.north,
            lrx: self.east,
            lry: self.south,
        }
    }

    /// Canonical text used when hashing the selection
    pub fn canonical(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

fn parse_field(value: &str, name: &str) -> Result<f64, String> {
    value.trim().parse::<f64>()
        .map_err(|_| format!("invalid {} value '{}'", name, value.trim()))
}

/// Upper-left / lower-right window in georeferenced coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub ulx: f64,
    pub uly: f64,
    pub lrx: f64,
    pub lry: f64,
}

impl Window {
    /// The four window values as command-line arguments
    pub fn to_args(&self) -> [String; 4] {
        [
            self.ulx.to_string(),
            self.uly.to_string(),
            self.lrx.to_string(),
            self.lry.to_string(),
        ]
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.ulx, self.uly, self.lrx, self.lry)
    }
}
