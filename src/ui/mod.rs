//! ui
//!
//! Output formatting and the interactive render surface.
//!
//! # Modules
//!
//! - [`output`] - Process-level output helpers gated by verbosity
//! - [`surface`] - The `render(text)` contract the shell core writes through
//!
//! # Design
//!
//! All user-facing text goes through this module. One-shot CLI invocations
//! use [`output`] directly; the interactive shell never prints on its own
//! and instead renders through an [`surface::OutputSurface`], which keeps
//! the core testable and the painting concern replaceable.

pub mod output;
pub mod surface;
