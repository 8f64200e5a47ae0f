//! Shared types for the noteboard application.
//!
//! This module contains the Result alias, the note draft passed into the
//! repository, the chart data point and the CLI subcommands.
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

use crate::{NoteboardError, DEFAULT_COLOR};

/// A specialized Result type for noteboard operations.
pub type Result<T> = std::result::Result<T, NoteboardError>;

/// The editable fields of a note, as submitted from the form
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub color: String,
    /// Parsed tag list
    pub tags: Vec<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        NoteDraft {
            title: title.into(),
            content: content.into(),
            color: DEFAULT_COLOR.to_string(),
            tags: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Number of notes created on one day, as fed to the bar chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Available subcommands for the noteboard application
#[derive(Subcommand)]
pub enum Commands {
    /// Log in with a username and password
    Login {
        #[clap(short, long)]
        username: String,

        #[clap(short, long)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show whether a session is active
    Status,

    /// Create a new note
    Create {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: String,

        /// Body of the note
        #[clap(short, long)]
        content: String,

        /// Background color as a hex string
        #[clap(long)]
        color: Option<String>,

        /// Tags to associate with the note (comma-separated)
        #[clap(short, long)]
        tags: Option<String>,
    },

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: i64,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New body for the note
        #[clap(short, long)]
        content: Option<String>,

        /// New background color
        #[clap(long)]
        color: Option<String>,

        /// Replacement tags (comma-separated)
        #[clap(short, long)]
        tags: Option<String>,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: i64,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Add a comment to a note
    Comment {
        /// ID of the note to comment on
        id: i64,

        /// Comment text
        text: String,
    },

    /// Move a note to a canvas position
    Move {
        /// ID of the note to move
        id: i64,

        #[clap(long, allow_hyphen_values = true)]
        x: f64,

        #[clap(long, allow_hyphen_values = true)]
        y: f64,
    },

    /// Drop a dragged note at a pointer position over the canvas
    Drop {
        /// ID of the dragged note
        id: i64,

        #[clap(long, allow_hyphen_values = true)]
        pointer_x: f64,

        #[clap(long, allow_hyphen_values = true)]
        pointer_y: f64,

        /// Left edge of the canvas in the same coordinate space as the pointer
        #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
        canvas_x: f64,

        /// Top edge of the canvas in the same coordinate space as the pointer
        #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
        canvas_y: f64,
    },

    /// List notes
    List {
        /// Only show notes carrying this tag
        #[clap(short, long)]
        tag: Option<String>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Show the number of notes created per day
    Stats {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write the file (default location otherwise)
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}
