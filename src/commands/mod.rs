//! CLI commands
//!
//! One command per subcommand, dispatched by [`ClipshipCommandFactory`].

pub mod cli;
pub mod command_traits;
pub mod derive_command;
pub mod fetch_command;
pub mod preview_command;

pub use cli::build_cli;
pub use command_traits::{Command, CommandFactory};
pub use derive_command::DeriveCommand;
pub use fetch_command::FetchCommand;
pub use preview_command::PreviewCommand;

use clap::ArgMatches;
use crate::api::ClipService;
use crate::engine::CancelFlag;
use crate::errors::{ClipError, ClipResult};

/// Factory for creating command instances based on CLI arguments
///
/// Picks the command from the subcommand name.
pub struct ClipshipCommandFactory {
    /// Raised to stop a running extraction
    cancel: CancelFlag,
}

impl ClipshipCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        Self::with_cancel(CancelFlag::new())
    }

    /// Factory whose commands stop their extraction when `cancel` is raised
    pub fn with_cancel(cancel: CancelFlag) -> Self {
        ClipshipCommandFactory { cancel }
    }
}

impl Default for ClipshipCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for ClipshipCommandFactory {
    fn create_command(&self, args: &ArgMatches, service: &'a ClipService) -> ClipResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("derive", sub)) => Ok(Box::new(DeriveCommand::new(sub, service, self.cancel.clone())?)),
            Some(("fetch", sub)) => Ok(Box::new(FetchCommand::new(sub, service)?)),
            Some(("preview", sub)) => Ok(Box::new(PreviewCommand::new(sub, service)?)),
            Some((other, _)) => Err(ClipError::GenericError(format!("Unknown command: {}", other))),
            None => Err(ClipError::GenericError("No command given".to_string())),
        }
    }
}
