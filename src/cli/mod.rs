//! CLI module for the noteboard application
//!
//! This module handles the command-line interface for interacting with the
//! application state.
mod app;
mod args;

pub use app::*;
pub use args::*;
