//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers never print directly: they write into
//! the engine's capture [`Streams`], and the one-shot path here prints the
//! captured text afterwards. That keeps every handler usable both from
//! the terminal and from the interactive shell's dispatch bridge, which
//! consumes the same captured streams.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;

use crate::engine::Streams;

/// Flags shared by every command invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    /// Enable debug output.
    pub debug: bool,
    /// Minimal output.
    pub quiet: bool,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let ctx = Context {
        debug: cli.debug,
        quiet: cli.quiet,
    };

    match cli.command {
        // The interactive console owns the terminal; nothing to capture.
        args::Command::Interactive { config } => commands::interactive(&ctx, config.as_deref()),
        command => {
            let mut streams = Streams::new();
            let result = commands::dispatch(command, &ctx, &mut streams);

            // Captured output is printed exactly once, whatever the outcome.
            print!("{}", streams.out);
            eprint!("{}", streams.err);

            result
        }
    }
}
