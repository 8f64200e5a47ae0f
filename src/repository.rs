use chrono::{DateTime, Utc};
use log::{debug, error, info, trace, warn};

use crate::{
    read_notes, write_notes, KeyValueStore, Note, NoteDraft, NoteId, NoteboardError, Position,
    Result,
};

/// Owns the ordered note list and mirrors it to the store.
///
/// Every mutating call writes the whole list back before returning.
pub struct NoteRepository<S: KeyValueStore> {
    store: S,
    notes: Vec<Note>,
    /// Highest id issued or loaded so far
    last_id: NoteId,
}

impl<S: KeyValueStore> NoteRepository<S> {
    /// Loads the note list from the store
    pub fn load(store: S) -> Result<Self> {
        let notes = read_notes(&store)?;
        let last_id = notes.iter().map(|note| note.id).max().unwrap_or(0);
        info!("Loaded {} notes", notes.len());

        Ok(Self {
            store,
            notes,
            last_id,
        })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Creates a note stamped with the current time
    pub fn create(&mut self, draft: NoteDraft) -> Result<Note> {
        self.create_at(draft, Utc::now())
    }

    /// Creates a note as if at `now`.
    ///
    /// The id is `now` in milliseconds, moved past the last issued id when
    /// the clock has not advanced. Fails once the id space is used up.
    pub fn create_at(&mut self, draft: NoteDraft, now: DateTime<Utc>) -> Result<Note> {
        let next = self.last_id.checked_add(1).ok_or_else(|| {
            error!("Cannot allocate a note id after {}", self.last_id);
            NoteboardError::IdsExhausted {
                last_id: self.last_id,
            }
        })?;
        let id = now.timestamp_millis().max(next);
        self.last_id = id;

        let note = Note::new(
            id,
            draft.title,
            draft.content,
            draft.color,
            draft.tags,
            now.date_naive(),
        );
        self.notes.push(note.clone());
        info!("Created note {}", id);

        self.persist()?;
        Ok(note)
    }

    /// Replaces the editable fields of note `id`; unknown ids are ignored
    pub fn update(&mut self, id: NoteId, draft: NoteDraft) -> Result<()> {
        let Some(note) = self.find_mut(id) else {
            debug!("Update ignored, no note {}", id);
            return Ok(());
        };

        note.title = draft.title;
        note.content = draft.content;
        note.color = draft.color;
        note.tags = draft.tags;
        info!("Updated note {}", id);

        self.persist()
    }

    /// Removes note `id` if present
    pub fn delete(&mut self, id: NoteId) -> Result<()> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);

        if self.notes.len() < before {
            info!("Deleted note {}", id);
        } else {
            debug!("Delete ignored, no note {}", id);
        }

        self.persist()
    }

    /// Appends `text` to the note's comments unless it is blank.
    ///
    /// Returns whether a comment was appended. The stored text is not
    /// trimmed.
    pub fn add_comment(&mut self, id: NoteId, text: &str) -> Result<bool> {
        if text.trim().is_empty() {
            trace!("Ignoring blank comment for note {}", id);
            return Ok(false);
        }

        let Some(note) = self.find_mut(id) else {
            debug!("Comment ignored, no note {}", id);
            return Ok(false);
        };
        note.comments.push(text.to_string());
        info!("Added comment to note {}", id);

        self.persist()?;
        Ok(true)
    }

    /// Moves note `id` to `(x, y)` on the canvas, unclamped.
    ///
    /// Infinite and NaN coordinates are rejected, since they cannot be
    /// stored as JSON numbers.
    pub fn reposition(&mut self, id: NoteId, x: f64, y: f64) -> Result<()> {
        if !x.is_finite() || !y.is_finite() {
            warn!("Rejected position ({}, {}) for note {}", x, y, id);
            return Err(NoteboardError::InvalidPosition { x, y });
        }

        match self.find_mut(id) {
            Some(note) => {
                note.position = Position::new(x, y);
                debug!("Moved note {} to ({}, {})", id, x, y);
            }
            None => debug!("Reposition ignored, no note {}", id),
        }

        self.persist()
    }

    fn find_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id == id)
    }

    fn persist(&self) -> Result<()> {
        write_notes(&self.store, &self.notes)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::{parse_tags, MemoryStore, DEFAULT_COLOR};

    fn repo() -> (MemoryStore, NoteRepository<MemoryStore>) {
        let store = MemoryStore::new();
        let repo = NoteRepository::load(store.clone()).unwrap();
        (store, repo)
    }

    fn at(day: u32, millis: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap() + chrono::Duration::milliseconds(millis)
    }

    #[test]
    fn create_appends_a_fresh_note() {
        let (store, mut repo) = repo();
        let draft = NoteDraft::new("Groceries", "milk").with_tags(parse_tags("food, errands"));

        let note = repo.create_at(draft, at(1, 0)).unwrap();

        let found: Vec<&Note> = repo.notes().iter().filter(|n| n.id == note.id).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Groceries");
        assert_eq!(found[0].content, "milk");
        assert_eq!(found[0].color, DEFAULT_COLOR);
        assert_eq!(found[0].tags, vec!["food", "errands"]);
        assert!(found[0].comments.is_empty());
        assert_eq!(found[0].position, Position::new(0.0, 0.0));
        assert_eq!(found[0].created_at, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(read_notes(&store).unwrap(), repo.notes());
    }

    #[test]
    fn ids_strictly_increase_within_one_tick() {
        let (_, mut repo) = repo();
        let now = at(1, 0);

        let a = repo.create_at(NoteDraft::new("a", "a"), now).unwrap();
        let b = repo.create_at(NoteDraft::new("b", "b"), now).unwrap();
        let c = repo.create_at(NoteDraft::new("c", "c"), now - chrono::Duration::seconds(5)).unwrap();

        assert_eq!(a.id, now.timestamp_millis());
        assert!(b.id > a.id);
        assert!(c.id > b.id);
    }

    #[test]
    fn ids_do_not_collide_with_loaded_notes() {
        let store = MemoryStore::new();
        let mut first = NoteRepository::load(store.clone()).unwrap();
        let existing = first.create_at(NoteDraft::new("a", "a"), at(2, 0)).unwrap();

        let mut second = NoteRepository::load(store).unwrap();
        let created = second.create_at(NoteDraft::new("b", "b"), at(1, 0)).unwrap();
        assert!(created.id > existing.id);
    }

    #[test]
    fn update_keeps_identity_fields() {
        let (_, mut repo) = repo();
        let note = repo.create_at(NoteDraft::new("t", "c"), at(1, 0)).unwrap();
        repo.add_comment(note.id, "first").unwrap();
        repo.reposition(note.id, 40.0, 50.0).unwrap();

        let draft = NoteDraft::new("t2", "c2")
            .with_color("#00ff00")
            .with_tags(vec!["x".into()]);
        repo.update(note.id, draft).unwrap();

        let updated = repo.get(note.id).unwrap();
        assert_eq!(updated.title, "t2");
        assert_eq!(updated.content, "c2");
        assert_eq!(updated.color, "#00ff00");
        assert_eq!(updated.tags, vec!["x"]);
        assert_eq!(updated.comments, vec!["first"]);
        assert_eq!(updated.position, Position::new(40.0, 50.0));
        assert_eq!(updated.created_at, note.created_at);
    }

    #[test]
    fn update_of_unknown_id_changes_nothing() {
        let (_, mut repo) = repo();
        repo.create_at(NoteDraft::new("t", "c"), at(1, 0)).unwrap();
        let before = repo.notes().to_vec();

        repo.update(42, NoteDraft::new("other", "other")).unwrap();

        assert_eq!(repo.notes(), before.as_slice());
    }

    #[test]
    fn delete_removes_at_most_one() {
        let (store, mut repo) = repo();
        let a = repo.create_at(NoteDraft::new("a", "a"), at(1, 0)).unwrap();
        repo.create_at(NoteDraft::new("b", "b"), at(1, 1)).unwrap();

        repo.delete(a.id).unwrap();
        assert_eq!(repo.len(), 1);
        assert!(repo.get(a.id).is_none());

        repo.delete(a.id).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(read_notes(&store).unwrap().len(), 1);
    }

    #[test]
    fn blank_comments_are_ignored() {
        let (_, mut repo) = repo();
        let note = repo.create_at(NoteDraft::new("t", "c"), at(1, 0)).unwrap();

        assert!(!repo.add_comment(note.id, "").unwrap());
        assert!(!repo.add_comment(note.id, "   ").unwrap());
        assert!(repo.get(note.id).unwrap().comments.is_empty());

        assert!(repo.add_comment(note.id, "hi").unwrap());
        assert!(repo.add_comment(note.id, " padded ").unwrap());
        assert_eq!(repo.get(note.id).unwrap().comments, vec!["hi", " padded "]);
    }

    #[test]
    fn comment_on_unknown_note_is_ignored() {
        let (_, mut repo) = repo();
        assert!(!repo.add_comment(7, "hello").unwrap());
    }

    #[test]
    fn reposition_accepts_any_coordinates() {
        let (store, mut repo) = repo();
        let note = repo.create_at(NoteDraft::new("t", "c"), at(1, 0)).unwrap();

        for (x, y) in [(-120.0, -3.5), (1e6, 98765.25), (0.0, 0.0)] {
            repo.reposition(note.id, x, y).unwrap();
            assert_eq!(repo.get(note.id).unwrap().position, Position::new(x, y));

            let reloaded = NoteRepository::load(store.clone()).unwrap();
            assert_eq!(reloaded.get(note.id).unwrap().position, Position::new(x, y));
        }
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let (store, mut repo) = repo();
        let note = repo.create_at(NoteDraft::new("t", "c"), at(1, 0)).unwrap();
        repo.add_comment(note.id, "keep").unwrap();
        repo.reposition(note.id, 5.0, 6.0).unwrap();

        for (x, y) in [(f64::INFINITY, 0.0), (0.0, f64::NEG_INFINITY), (f64::NAN, 1.0)] {
            let err = repo.reposition(note.id, x, y).unwrap_err();
            assert!(matches!(err, NoteboardError::InvalidPosition { .. }));
        }

        let reloaded = NoteRepository::load(store).unwrap();
        let stored = reloaded.get(note.id).unwrap();
        assert_eq!(stored.position, Position::new(5.0, 6.0));
        assert_eq!(stored.comments, vec!["keep"]);
    }

    #[test]
    fn create_fails_when_ids_run_out() {
        let store = MemoryStore::new();
        let mut stored = Note::new(
            i64::MAX,
            "last".into(),
            "c".into(),
            DEFAULT_COLOR.into(),
            Vec::new(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        stored.comments.push("old".into());
        write_notes(&store, &[stored.clone()]).unwrap();

        let mut repo = NoteRepository::load(store.clone()).unwrap();
        let err = repo.create_at(NoteDraft::new("t", "c"), at(1, 0)).unwrap_err();

        assert!(matches!(err, NoteboardError::IdsExhausted { last_id: i64::MAX }));
        assert_eq!(repo.notes(), &[stored]);
        assert_eq!(read_notes(&store).unwrap().len(), 1);
    }

    #[test]
    fn list_order_survives_reload() {
        let (store, mut repo) = repo();
        for (i, title) in ["one", "two", "three"].iter().enumerate() {
            repo.create_at(NoteDraft::new(*title, "c"), at(1, i as i64)).unwrap();
        }

        let reloaded = NoteRepository::load(store).unwrap();
        assert_eq!(reloaded.notes(), repo.notes());
    }
}
