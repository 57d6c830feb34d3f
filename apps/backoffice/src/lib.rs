//! # Backoffice Library
//!
//! Exposes the CLI command functions for testing.
//!
//! The binary dispatches to these through the `main.rs` entry point.

pub mod cli;

// Re-export backoffice_core for convenience
pub use backoffice_core;
