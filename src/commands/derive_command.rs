//! Clip derivation command
//!
//! Builds the request parameters from the command line, derives the clip
//! and prints the JSON response body.

use std::fs;

use clap::ArgMatches;
use log::{debug, info};

use crate::api::ClipService;
use crate::commands::command_traits::Command;
use crate::engine::CancelFlag;
use crate::errors::{ClipError, ClipResult};
use crate::response::ClipResponse;
use crate::selection::{QueryParams, BBOX_PARAM, GEOJSON_PARAM};

/// Command deriving a clip from a layer
pub struct DeriveCommand<'a> {
    /// Layer to clip
    layer: String,
    /// Request parameters
    params: QueryParams,
    cancel: CancelFlag,
    service: &'a ClipService,
}

impl<'a> DeriveCommand<'a> {
    /// Create a new derive command
    ///
    /// `--param` pairs are applied first; `--bbox`, `--geojson` and
    /// `--geojson-file` override them.
    pub fn new(args: &ArgMatches, service: &'a ClipService, cancel: CancelFlag) -> ClipResult<Self> {
        let layer = args.get_one::<String>("layer")
            .ok_or_else(|| ClipError::GenericError("Missing layer name".to_string()))?
            .clone();

        let mut params = QueryParams::new();
        if let Some(pairs) = args.get_many::<String>("param") {
            for pair in pairs {
                let (key, value) = QueryParams::parse_pair(pair)?;
                params.insert(&key, &value);
            }
        }

        if let Some(bbox) = args.get_one::<String>("bbox") {
            params.insert(BBOX_PARAM, bbox);
        }

        if let Some(geojson) = args.get_one::<String>("geojson") {
            params.insert(GEOJSON_PARAM, geojson);
        } else if let Some(path) = args.get_one::<String>("geojson-file") {
            info!("Reading mask polygon from {}", path);
            let text = fs::read_to_string(path)?;
            params.insert(GEOJSON_PARAM, &text);
        }
        debug!("Derive parameters: {:?}", params);

        Ok(DeriveCommand { layer, params, cancel, service })
    }
}

impl<'a> Command for DeriveCommand<'a> {
    fn execute(&self) -> ClipResult<()> {
        let result = self.service.derive_with_cancel(&self.layer, &self.params, &self.cancel);
        let response = ClipResponse::from_result(&result);

        println!("{}", response.body_text());
        info!("Derive finished with status {}", response.status_code());

        result.map(|_| ())
    }
}
