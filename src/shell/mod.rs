//! shell
//!
//! The interactive core: catalog, dispatch bridge, history, controller.
//!
//! # Modules
//!
//! - [`catalog`] - Flattens the engine's command tree into an addressable catalog
//! - [`dispatch`] - Runs resolved commands off the interactive thread
//! - [`history`] - Bounded, persisted command history and the recall cursor
//! - [`controller`] - Resolves input lines and drives dispatch and rendering
//!
//! # Design
//!
//! The shell owns no command semantics of its own beyond three builtins
//! (`help`, `history`, `exit`/`quit`). Everything else is resolved against
//! the catalog built from the engine's declarative tree and executed
//! through the dispatch bridge, which turns every handler outcome -
//! success, failure, or panic - into one structured result.

pub mod catalog;
pub mod controller;
pub mod dispatch;
pub mod history;

pub use catalog::{Catalog, CatalogBuildResult, CommandSpec};
pub use controller::{LineOutcome, ShellController};
pub use dispatch::{DispatchBridge, DispatchResult};
pub use history::{HistoryStore, NavigationCursor};
