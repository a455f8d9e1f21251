//! list-commands command - List all available commands

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::args::Cli;
use crate::engine::Streams;

/// List every command the CLI defines, sorted by name.
pub fn list_commands(streams: &mut Streams) -> Result<()> {
    let cmd = Cli::command();

    streams.outln("Available commands:");

    let mut subcommands: Vec<_> = cmd.get_subcommands().collect();
    subcommands.sort_by_key(|sub| sub.get_name().to_string());

    for sub in subcommands {
        let help = sub
            .get_about()
            .map(|about| about.to_string())
            .unwrap_or_else(|| "No description".to_string());
        streams.outln(format!("  {:<20} {}", sub.get_name(), help));
    }

    Ok(())
}
