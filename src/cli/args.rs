//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output
//!
//! The implicit `help` subcommand is disabled: inside the interactive
//! console `help` is a shell builtin, and the tree reflection handed to
//! the catalog must contain only real commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Quarterdeck - an interactive console for the OCX report CLI
#[derive(Parser, Debug)]
#[command(name = "qd")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive console
    #[command(
        name = "interactive",
        long_about = "Launch the interactive console.\n\n\
            Every command below is available inside the console, addressed by \
            name (or by 'group subcommand' for grouped commands). The console \
            adds its own builtins: 'help' for catalog help, 'history' for the \
            session history, and 'exit' or 'quit' to leave. Submitted lines \
            are kept in a persisted history across sessions.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Start the console with the default configuration
    qd interactive

    # Point the console at a project-specific configuration
    qd interactive --config .quarterdeck.toml"
    )]
    Interactive {
        /// Config file path
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Display the application version
    Version,

    /// List all available commands
    #[command(name = "list-commands")]
    ListCommands,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Serialisation of a report to disk
    #[command(disable_help_subcommand = true)]
    Serialize {
        #[command(subcommand)]
        format: SerializeFormat,
    },
}

/// Report output formats.
#[derive(Subcommand, Debug)]
pub enum SerializeFormat {
    /// Write the sample report as JSON
    Json {
        /// The output file name
        #[arg(short = 'f', long = "file-name", default_value = "report.json")]
        file_name: PathBuf,
    },

    /// Write the sample report as CSV
    Csv {
        /// The output file name
        #[arg(short = 'f', long = "file-name", default_value = "report.csv")]
        file_name: PathBuf,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
