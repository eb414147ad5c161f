//! Command pattern interfaces
//!
//! Each CLI subcommand is a [`Command`] built by a [`CommandFactory`]
//! from the parsed arguments and a shared [`ClipService`].

use crate::api::ClipService;
use crate::errors::ClipResult;

/// One runnable CLI operation
pub trait Command {
    /// Run the operation, printing its result to stdout
    fn execute(&self) -> ClipResult<()>;
}

/// Builds commands from parsed CLI arguments
pub trait CommandFactory<'a> {
    /// Pick and construct the command for the given subcommand
    ///
    /// # Arguments
    /// * `args` - Top-level argument matches from clap
    /// * `service` - Clip service the command runs against
    fn create_command(&self, args: &clap::ArgMatches, service: &'a ClipService) -> ClipResult<Box<dyn Command + 'a>>;
}
