//! Archive download command

use std::fs;
use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::api::ClipService;
use crate::commands::command_traits::Command;
use crate::errors::{ClipError, ClipResult};

/// Command packaging a derived clip into a zip file
pub struct FetchCommand<'a> {
    layer: String,
    clip_filename: String,
    /// Destination of the zip; defaults to the archive name in the working directory
    output: Option<PathBuf>,
    service: &'a ClipService,
}

impl<'a> FetchCommand<'a> {
    pub fn new(args: &ArgMatches, service: &'a ClipService) -> ClipResult<Self> {
        let layer = args.get_one::<String>("layer")
            .ok_or_else(|| ClipError::GenericError("Missing layer name".to_string()))?
            .clone();
        let clip_filename = args.get_one::<String>("clip_filename")
            .ok_or_else(|| ClipError::GenericError("Missing clip file name".to_string()))?
            .clone();
        let output = args.get_one::<String>("output").map(PathBuf::from);

        Ok(FetchCommand { layer, clip_filename, output, service })
    }
}

impl<'a> Command for FetchCommand<'a> {
    fn execute(&self) -> ClipResult<()> {
        let archive = self.service.fetch_archive(&self.layer, &self.clip_filename)?;
        let destination = self.output.clone()
            .unwrap_or_else(|| PathBuf::from(&archive.file_name));

        fs::write(&destination, &archive.bytes)?;
        info!("Wrote {} ({} bytes)", destination.display(), archive.bytes.len());
        println!("{}", destination.display());
        Ok(())
    }
}
