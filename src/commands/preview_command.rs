//! Preview context command

use clap::ArgMatches;

use crate::api::ClipService;
use crate::commands::command_traits::Command;
use crate::errors::{ClipError, ClipResult};

/// Command printing the preview page context as JSON
pub struct PreviewCommand<'a> {
    geotiff_name: String,
    service: &'a ClipService,
}

impl<'a> PreviewCommand<'a> {
    pub fn new(args: &ArgMatches, service: &'a ClipService) -> ClipResult<Self> {
        let geotiff_name = args.get_one::<String>("name")
            .ok_or_else(|| ClipError::GenericError("Missing raster name".to_string()))?
            .clone();
        Ok(PreviewCommand { geotiff_name, service })
    }
}

impl<'a> Command for PreviewCommand<'a> {
    fn execute(&self) -> ClipResult<()> {
        let context = self.service.preview(&self.geotiff_name);
        let text = serde_json::to_string_pretty(&context)
            .map_err(|e| ClipError::GenericError(format!("Failed to serialize preview: {}", e)))?;
        println!("{}", text);
        Ok(())
    }
}
