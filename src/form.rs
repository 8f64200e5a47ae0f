//! The note form: a transient draft that either creates a new note or
//! edits an existing one.
use log::{debug, info};

use crate::{
    join_tags, parse_tags, KeyValueStore, Note, NoteDraft, NoteId, NoteRepository,
    NoteboardError, Result, DEFAULT_COLOR,
};

/// Whether the form creates a note or edits a bound one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing(NoteId),
}

/// What a successful submit did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Note),
    Updated(NoteId),
}

#[derive(Debug)]
pub struct FormController {
    mode: FormMode,
    pub title: String,
    pub content: String,
    pub color: String,
    /// Raw comma-separated tag input
    pub tags: String,
    /// Shared comment input
    pub comment: String,
    /// Color the form resets to
    default_color: String,
}

impl Default for FormController {
    fn default() -> Self {
        Self {
            mode: FormMode::Creating,
            title: String::new(),
            content: String::new(),
            color: DEFAULT_COLOR.to_string(),
            tags: String::new(),
            comment: String::new(),
            default_color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form whose color field starts at, and resets to, `color`
    pub fn with_default_color(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            color: color.clone(),
            default_color: color,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Binds the form to `note` and fills the fields from it
    pub fn start_edit(&mut self, note: &Note) {
        debug!("Editing note {}", note.id);
        self.mode = FormMode::Editing(note.id);
        self.title = note.title.clone();
        self.content = note.content.clone();
        self.color = note.color.clone();
        self.tags = join_tags(&note.tags);
    }

    /// Drops the draft and returns to creating
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Builds the draft the repository receives
    pub fn draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            color: self.color.clone(),
            tags: parse_tags(&self.tags),
        }
    }

    /// Creates or updates a note from the fields, then resets the form.
    ///
    /// Title and content are required; when either is empty nothing is
    /// submitted and the fields are kept.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        repository: &mut NoteRepository<S>,
    ) -> Result<SubmitOutcome> {
        if self.title.is_empty() {
            return Err(NoteboardError::MissingField { field: "title" });
        }
        if self.content.is_empty() {
            return Err(NoteboardError::MissingField { field: "content" });
        }

        let outcome = match self.mode {
            FormMode::Creating => SubmitOutcome::Created(repository.create(self.draft())?),
            FormMode::Editing(id) => {
                repository.update(id, self.draft())?;
                SubmitOutcome::Updated(id)
            }
        };

        info!("Form submitted: {:?}", outcome);
        self.reset();
        Ok(outcome)
    }

    /// Adds the comment field to note `id`, clearing the field if it was used
    pub fn submit_comment<S: KeyValueStore>(
        &mut self,
        repository: &mut NoteRepository<S>,
        id: NoteId,
    ) -> Result<bool> {
        let added = repository.add_comment(id, &self.comment)?;
        if added {
            self.comment.clear();
        }
        Ok(added)
    }

    fn reset(&mut self) {
        self.mode = FormMode::Creating;
        self.title.clear();
        self.content.clear();
        self.tags.clear();
        self.color = self.default_color.clone();
    }
}
