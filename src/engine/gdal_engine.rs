//! GDAL command-line engine
//!
//! Windowed extracts run `gdal_translate -projwin`; cutline masks run
//! `gdalwarp` with an alpha band. Arguments are passed as a vector, never
//! through a shell.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{error, info};

use crate::config::ToolSettings;
use crate::errors::ToolError;
use crate::selection::Window;

use super::engine_strategy::ExtractionEngine;
use super::process::{run_tool, CancelFlag};

/// Engine invoking the GDAL utilities
#[derive(Debug, Clone)]
pub struct GdalEngine {
    translate: PathBuf,
    warp: PathBuf,
    timeout: Duration,
}

impl GdalEngine {
    pub fn new(translate: PathBuf, warp: PathBuf, timeout: Duration) -> Self {
        GdalEngine {
            translate,
            warp,
            timeout,
        }
    }

    pub fn from_settings(tools: &ToolSettings) -> Self {
        GdalEngine::new(tools.gdal_translate.clone(), tools.gdalwarp.clone(), tools.timeout())
    }

    /// Arguments of the windowed extract
    pub fn translate_args(source: &Path, window: &Window, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-projwin".into()];
        args.extend(window.to_args().into_iter().map(OsString::from));
        args.push(source.into());
        args.push(output.into());
        args
    }

    /// Arguments of the cutline mask
    pub fn warp_args(source: &Path, mask_file: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-dstnodata", "0", "-q", "-cutline"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(mask_file.into());
        args.extend(["-crop_to_cutline", "-dstalpha", "-of", "GTiff"].into_iter().map(OsString::from));
        args.push(source.into());
        args.push(output.into());
        args
    }

    fn run(&self, program: &Path, args: &[OsString], output: &Path, cancel: &CancelFlag) -> Result<PathBuf, ToolError> {
        match run_tool(program, args, self.timeout, cancel) {
            Ok(result) => {
                if !output.is_file() {
                    error!("{} exited cleanly but wrote no {}", program.display(), output.display());
                    return Err(ToolError::NoOutput(output.to_path_buf()));
                }
                info!("Wrote {} in {:?}", output.display(), result.elapsed);
                Ok(output.to_path_buf())
            },
            Err(e) => {
                error!("Extraction failed: {}", e);
                Err(e)
            },
        }
    }
}

impl ExtractionEngine for GdalEngine {
    fn windowed_extract(
        &self,
        source: &Path,
        window: &Window,
        output: &Path,
        cancel: &CancelFlag,
    ) -> Result<PathBuf, ToolError> {
        info!("Clipping {} to window {}", source.display(), window);
        let args = Self::translate_args(source, window, output);
        self.run(&self.translate, &args, output, cancel)
    }

    fn cutline_mask(
        &self,
        source: &Path,
        mask_file: &Path,
        output: &Path,
        cancel: &CancelFlag,
    ) -> Result<PathBuf, ToolError> {
        info!("Masking {} with {}", source.display(), mask_file.display());
        let args = Self::warp_args(source, mask_file, output);
        self.run(&self.warp, &args, output, cancel)
    }

    fn name(&self) -> &'static str {
        "gdal"
    }
}
