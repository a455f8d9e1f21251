//! shell::dispatch
//!
//! Asynchronous bridge between the interactive surface and the
//! synchronous command engine.
//!
//! # Design
//!
//! The engine is synchronous and may block, print, or panic. The bridge
//! runs every invocation on a blocking worker via
//! `tokio::task::spawn_blocking`, so the interactive thread keeps
//! handling input while a command runs, and folds every failure mode -
//! engine errors and handler panics alike - into a structured
//! [`DispatchResult`]. `dispatch` never returns an error and never
//! panics.
//!
//! When a command fails without writing anything, the bridge re-invokes
//! the same path with a help flag to recover a usage message; a handler
//! that dies before printing still leaves the user something to read.

use std::sync::Arc;

use crate::engine::{Engine, Invocation};

/// Structured outcome of one dispatch.
#[derive(Debug, Clone, Default)]
pub struct DispatchResult {
    /// Exit code of the underlying command; 0 is success.
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Help text, populated only when help was explicitly requested or
    /// recovered after a silent failure.
    pub help_text: String,
}

impl DispatchResult {
    /// Result for an invocation that faulted instead of completing.
    fn failed(message: impl std::fmt::Display) -> Self {
        Self {
            exit_code: 1,
            stderr: format!("Command execution failed: {}", message),
            ..Self::default()
        }
    }

    /// Whether the command exited cleanly.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs resolved commands off the interactive thread.
#[derive(Clone)]
pub struct DispatchBridge {
    engine: Arc<dyn Engine>,
}

impl DispatchBridge {
    /// Bridge over an engine.
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Execute a resolved catalog path with extra arguments.
    ///
    /// Suspends the caller without blocking other interactive work. Never
    /// raises: a handler that returns non-zero, prints nothing, errors,
    /// or panics still yields a structured result.
    pub async fn dispatch(&self, path: &[String], extra: &[String]) -> DispatchResult {
        let mut argv: Vec<String> = path.to_vec();
        argv.extend_from_slice(extra);

        let invocation = match self.invoke(argv.clone()).await {
            Ok(invocation) => invocation,
            Err(message) => return DispatchResult::failed(message),
        };

        let mut help_text = String::new();
        if argv.iter().any(|arg| is_help_flag(arg)) {
            // Help is conventionally written to stdout; keep stdout
            // populated for callers that want the raw text.
            help_text = invocation.stdout.clone();
        } else if invocation.exit_code != 0
            && invocation.stdout.is_empty()
            && invocation.stderr.is_empty()
        {
            // Silent failure: recover a usage message for the same path.
            argv.push("--help".to_string());
            if let Ok(help) = self.invoke(argv).await {
                help_text = help.stdout;
            }
        }

        DispatchResult {
            exit_code: invocation.exit_code,
            stdout: invocation.stdout,
            stderr: invocation.stderr,
            help_text,
        }
    }

    /// Run one argument vector on a blocking worker.
    ///
    /// Collapses engine errors and panics into a displayable message.
    async fn invoke(&self, argv: Vec<String>) -> Result<Invocation, String> {
        let engine = Arc::clone(&self.engine);
        let handle = tokio::task::spawn_blocking(move || engine.invoke(&argv));

        match handle.await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(join_error) => {
                if join_error.is_panic() {
                    let payload = join_error.into_panic();
                    let message = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "handler panicked".to_string());
                    Err(message)
                } else {
                    Err("dispatch task cancelled".to_string())
                }
            }
        }
    }
}

/// Whether an argument explicitly requests help.
pub(crate) fn is_help_flag(arg: &str) -> bool {
    arg == "--help" || arg == "-h"
}
