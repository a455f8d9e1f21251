//! engine
//!
//! The command-execution boundary.
//!
//! # Architecture
//!
//! The [`Engine`] trait is the contract between the interactive shell and
//! whatever actually runs commands. An engine accepts one argument vector,
//! runs it to completion synchronously, and hands back everything the
//! command wrote as a captured [`Invocation`] triple. The shell's dispatch
//! bridge owns moving that synchronous call off the interactive thread;
//! the engine owns capture.
//!
//! An engine also supplies the declarative [`CommandNode`] tree the shell
//! flattens into its catalog. The tree is reflection data only: names,
//! help strings, children. Handlers never appear in it.
//!
//! # Modules
//!
//! - [`runner`]: [`CliEngine`], the production engine over the clap tree
//! - [`mock`]: [`MockEngine`], deterministic engine double for tests

pub mod mock;
pub mod runner;

pub use mock::MockEngine;
pub use runner::CliEngine;

use thiserror::Error;

/// Errors an engine may raise instead of completing an invocation.
///
/// These never reach the user directly: the dispatch bridge folds them
/// into a failed dispatch result.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The argument vector was rejected before execution.
    #[error("invalid argument vector: {0}")]
    InvalidArgv(String),

    /// The engine itself failed internally.
    #[error("{0}")]
    Internal(String),
}

/// Captured outcome of one synchronous command invocation.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Process-style exit code; 0 is success.
    pub exit_code: i32,
    /// Everything the command wrote to standard output.
    pub stdout: String,
    /// Everything the command wrote to standard error.
    pub stderr: String,
}

/// Output capture for one invocation.
///
/// Command handlers write here instead of the process streams, so the
/// same handler serves both one-shot CLI calls (the streams are printed
/// afterwards) and interactive dispatch (the streams are rendered by the
/// shell).
#[derive(Debug, Default)]
pub struct Streams {
    /// Captured standard output.
    pub out: String,
    /// Captured standard error.
    pub err: String,
}

impl Streams {
    /// Fresh, empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to captured stdout.
    pub fn outln(&mut self, line: impl std::fmt::Display) {
        self.out.push_str(&line.to_string());
        self.out.push('\n');
    }

    /// Append a line to captured stderr.
    pub fn errln(&mut self, line: impl std::fmt::Display) {
        self.err.push_str(&line.to_string());
        self.err.push('\n');
    }
}

/// Executes argument vectors and describes the command tree.
///
/// Implementations are synchronous and may block; callers that must not
/// block (the interactive shell) go through the dispatch bridge, which
/// runs `invoke` on a blocking worker and contains panics.
pub trait Engine: Send + Sync {
    /// Run one argument vector to completion, capturing its output.
    ///
    /// The vector holds the command path tokens followed by any extra
    /// arguments, e.g. `["serialize", "json", "--file-name", "out.json"]`.
    fn invoke(&self, argv: &[String]) -> Result<Invocation, EngineError>;

    /// The declarative command tree this engine executes.
    fn command_tree(&self) -> Vec<CommandNode>;
}

/// One node of the declarative command tree.
///
/// A node with children is a group; its children are themselves nodes,
/// though the shell catalogs only two levels of depth.
#[derive(Debug, Clone, Default)]
pub struct CommandNode {
    /// Token the command is invoked by.
    pub name: String,
    /// Full help text, if the command declares one.
    pub help: Option<String>,
    /// One-line help text, if the command declares one.
    pub short_help: Option<String>,
    /// Child commands; empty for leaves.
    pub children: Vec<CommandNode>,
}

impl CommandNode {
    /// Leaf node with a name and optional one-line help.
    pub fn leaf(name: impl Into<String>, short_help: Option<&str>) -> Self {
        Self {
            name: name.into(),
            short_help: short_help.map(String::from),
            ..Self::default()
        }
    }

    /// Group node with children.
    pub fn group(
        name: impl Into<String>,
        short_help: Option<&str>,
        children: Vec<CommandNode>,
    ) -> Self {
        Self {
            name: name.into(),
            short_help: short_help.map(String::from),
            children,
            ..Self::default()
        }
    }
}
