//! Quarterdeck - an interactive console front-end for the OCX report CLI
//!
//! Quarterdeck is a single-binary tool that wraps a small report-oriented
//! command-line interface in a persistent interactive console: commands are
//! resolved against a flattened catalog of the CLI's command tree, executed
//! off the interactive thread, and recorded in a bounded, persisted history
//! with readline-style recall.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`engine`] - Command-execution boundary (argument-vector invocation with
//!   captured output, command-tree reflection)
//! - [`shell`] - The interactive core: catalog, dispatch bridge, history,
//!   and the line controller
//! - [`config`] - Application configuration loading and persistence
//! - [`ui`] - Output formatting and the render surface
//!
//! # Correctness Invariants
//!
//! Quarterdeck maintains the following invariants:
//!
//! 1. The command catalog is built once at startup and never mutated
//! 2. A dispatched handler can never crash or block the interactive surface
//! 3. Submitted input is appended to history before dispatch begins
//! 4. No failure short of an explicit exit terminates the interactive session

pub mod cli;
pub mod config;
pub mod engine;
pub mod shell;
pub mod ui;
