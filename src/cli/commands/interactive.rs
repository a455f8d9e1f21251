//! interactive command - Launch the interactive console
//!
//! This is the line-based front end around the shell core: it reads one
//! line at a time from stdin, hands it to the controller, and leaves when
//! the controller says so or the input stream ends. Everything stateful -
//! catalog, history, dispatch - lives in [`crate::shell`]; this module
//! only wires it to a terminal.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::config::Config;
use crate::engine::{CliEngine, Engine};
use crate::shell::catalog::Catalog;
use crate::shell::controller::{LineOutcome, ShellController};
use crate::shell::dispatch::DispatchBridge;
use crate::shell::history::HistoryStore;
use crate::ui::output::{self, Verbosity};
use crate::ui::surface::ConsoleSurface;

/// Launch the interactive console on stdin/stdout.
pub fn interactive(ctx: &Context, config_path: Option<&Path>) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);

    let config = Config::load(config_path).context("Failed to load configuration")?;
    let history = HistoryStore::load(config.history_file(), config.max_history());

    let engine = Arc::new(CliEngine::new());
    let build = Catalog::build(&engine.command_tree());
    for diagnostic in &build.diagnostics {
        output::warn(diagnostic, verbosity);
    }
    output::debug(
        format!("loaded {} commands", build.catalog.len()),
        verbosity,
    );

    let mut controller = ShellController::new(
        build.catalog,
        DispatchBridge::new(engine),
        history,
        Arc::new(ConsoleSurface),
    );

    let runtime =
        tokio::runtime::Runtime::new().context("Failed to start the dispatch runtime")?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "{}", config.prompt())?;
        stdout.flush()?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            // EOF leaves the session the same way an explicit exit does.
            break;
        }

        if runtime.block_on(controller.handle_line(&line)) == LineOutcome::Exit {
            break;
        }
    }

    controller.shutdown();
    if let Err(err) = config.save() {
        output::warn(format!("failed to save configuration: {}", err), verbosity);
    }

    Ok(())
}
