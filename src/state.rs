//! Application state shared by every surface.
//!
//! `AppState` owns the session, the note repository and the two
//! controllers. Note operations are refused while logged out.
use log::warn;

use crate::{
    notes_per_day, Config, DayCount, DragController, FormController, KeyValueStore, Note,
    NoteId, NoteRepository, NoteboardError, Position, Result, SessionManager, SubmitOutcome,
};

pub struct AppState<S: KeyValueStore> {
    session: SessionManager<S>,
    repository: NoteRepository<S>,
    form: FormController,
    drag: DragController,
}

impl<S: KeyValueStore> AppState<S> {
    /// Restores session and notes from `store`
    pub fn load(store: S, config: &Config) -> Result<Self> {
        Ok(Self {
            session: SessionManager::load(store.clone())?,
            repository: NoteRepository::load(store)?,
            form: FormController::with_default_color(config.default_color.clone()),
            drag: DragController::new(),
        })
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionManager<S> {
        &mut self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        self.session.login(username, password)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.drag.drag_end();
        self.form.cancel();
        self.session.logout()
    }

    fn ensure_logged_in(&self) -> Result<()> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            warn!("Note operation refused while logged out");
            Err(NoteboardError::NotAuthenticated)
        }
    }

    pub fn notes(&self) -> Result<&[Note]> {
        self.ensure_logged_in()?;
        Ok(self.repository.notes())
    }

    /// Notes carrying `tag`, or every note when no tag is given
    pub fn notes_tagged(&self, tag: Option<&str>) -> Result<Vec<&Note>> {
        Ok(self
            .notes()?
            .iter()
            .filter(|note| tag.map_or(true, |t| note.tags.iter().any(|own| own == t)))
            .collect())
    }

    pub fn note(&self, id: NoteId) -> Result<&Note> {
        self.ensure_logged_in()?;
        self.repository
            .get(id)
            .ok_or(NoteboardError::NoteNotFound { id })
    }

    /// Chart data for the current note list
    pub fn notes_per_day(&self) -> Result<Vec<DayCount>> {
        self.ensure_logged_in()?;
        Ok(notes_per_day(self.repository.notes()))
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    /// Loads note `id` into the form for editing
    pub fn start_edit(&mut self, id: NoteId) -> Result<()> {
        self.ensure_logged_in()?;
        let note = self
            .repository
            .get(id)
            .ok_or(NoteboardError::NoteNotFound { id })?;
        self.form.start_edit(note);
        Ok(())
    }

    pub fn submit_form(&mut self) -> Result<SubmitOutcome> {
        self.ensure_logged_in()?;
        self.form.submit(&mut self.repository)
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<()> {
        self.ensure_logged_in()?;
        self.repository.delete(id)
    }

    /// Submits the shared comment field against note `id`
    pub fn add_comment(&mut self, id: NoteId) -> Result<bool> {
        self.ensure_logged_in()?;
        self.form.submit_comment(&mut self.repository, id)
    }

    pub fn reposition(&mut self, id: NoteId, x: f64, y: f64) -> Result<()> {
        self.ensure_logged_in()?;
        self.repository.reposition(id, x, y)
    }

    pub fn drag_start(&mut self, id: NoteId) -> Result<()> {
        self.ensure_logged_in()?;
        self.drag.drag_start(id);
        Ok(())
    }

    pub fn drag_over(&self) -> bool {
        self.drag.drag_over()
    }

    pub fn drag_end(&mut self) {
        self.drag.drag_end();
    }

    pub fn drop(&mut self, pointer: Position, canvas_origin: Position) -> Result<Option<Position>> {
        self.ensure_logged_in()?;
        self.drag.drop(&mut self.repository, pointer, canvas_origin)
    }
}
