//! Core data structures for the noteboard application.
//!
//! This module contains the Note entity and the value types it carries.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a note, derived from its creation time in milliseconds.
pub type NoteId = i64;

/// Color given to notes when none is picked.
pub const DEFAULT_COLOR: &str = "#ffffff";

/// A point on the canvas, in pixels relative to its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// Represents a single note on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier for the note
    pub id: NoteId,
    /// Note title
    pub title: String,
    /// Note body text
    pub content: String,
    /// Background color as a hex string
    #[serde(default = "default_color")]
    pub color: String,
    /// Tags in the order they were typed
    #[serde(default)]
    pub tags: Vec<String>,
    /// Append-only comment thread
    #[serde(default)]
    pub comments: Vec<String>,
    /// Day the note was created
    pub created_at: NaiveDate,
    /// Where the note sits on the canvas
    #[serde(default)]
    pub position: Position,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Note {
    /// Creates a new note at the canvas origin with no comments
    pub fn new(
        id: NoteId,
        title: String,
        content: String,
        color: String,
        tags: Vec<String>,
        created_at: NaiveDate,
    ) -> Self {
        Note {
            id,
            title,
            content,
            color,
            tags,
            comments: Vec::new(),
            created_at,
            position: Position::default(),
        }
    }
}
