//! Noteboard application library
//!
//! This library provides a note board: colored notes with tags and
//! comments, laid out on a canvas, kept in a local key-value store behind
//! a login gate, plus a per-day count of created notes for charting.

mod cli;
mod config;
mod drag;
mod errors;
mod form;
mod helper;
mod note;
mod repository;
mod session;
mod state;
mod stats;
mod storage;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use drag::*;
pub use errors::*;
pub use form::*;
pub use helper::*;
pub use note::*;
pub use repository::*;
pub use session::*;
pub use state::*;
pub use stats::*;
pub use storage::*;
pub use types::*;
