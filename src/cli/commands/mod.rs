//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler validates its arguments, does its work, and
//! writes everything user-facing into the capture [`Streams`] it is
//! handed. Handlers never touch the process streams, so the same code
//! path serves one-shot CLI calls and interactive dispatch.

mod completion;
mod interactive;
mod list_commands;
mod serialize;
mod version;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use interactive::interactive;
pub use list_commands::list_commands;
pub use serialize::{sample_reports, Report};
pub use version::version;

use anyhow::{bail, Result};

use crate::cli::args::{Command, SerializeFormat};
use crate::cli::Context;
use crate::engine::Streams;

/// Dispatch a command to its handler.
///
/// `interactive` is intentionally not handled here: it owns the terminal
/// and is routed directly by [`crate::cli::run`], and the engine refuses
/// to dispatch it from inside a session.
pub fn dispatch(command: Command, ctx: &Context, streams: &mut Streams) -> Result<()> {
    match command {
        Command::Interactive { .. } => {
            bail!("the interactive console cannot be started from a captured dispatch")
        }
        Command::Version => version::version(streams),
        Command::ListCommands => list_commands::list_commands(streams),
        Command::Completion { shell } => completion::completion(shell, streams),
        Command::Serialize { format } => match format {
            SerializeFormat::Json { file_name } => serialize::json(ctx, &file_name, streams),
            SerializeFormat::Csv { file_name } => serialize::csv(ctx, &file_name, streams),
        },
    }
}
