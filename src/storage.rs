use std::{
    cell::RefCell,
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, error, info, trace, warn};
use tempfile::NamedTempFile;

use crate::{decode_notes, Note, NoteboardError, Result};

/// Key holding the serialized note list
pub const NOTES_KEY: &str = "notes";

/// Key holding the serialized session flag
pub const LOGGED_IN_KEY: &str = "isLoggedIn";

/// A string-keyed store with whole-value reads and writes.
///
/// Handles are cheap to clone and every clone sees the same entries, so
/// the session and the note repository can each hold one.
pub trait KeyValueStore: Clone {
    /// Returns the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`
    fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key` from the store
    fn remove(&self, key: &str) -> Result<()>;
}

/// Store backed by a single JSON object file on disk.
///
/// The file is re-read on every access and rewritten atomically on every
/// change, so independent handles on the same path stay consistent.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Opens the store at `path`, creating its parent directory if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating store directory: {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| {
                    error!("Failed to create store directory {}: {}", parent.display(), e);
                    NoteboardError::DirectoryError {
                        path: parent.to_path_buf(),
                    }
                })?;
            }
        }

        info!("Using store file: {}", path.display());
        Ok(FileStore { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            trace!("Store file {} does not exist yet", self.path.display());
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            error!("Failed to read store file {}: {}", self.path.display(), e);
            NoteboardError::Io(e)
        })?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    "Store file {} is not a JSON object, starting empty: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }

    /// Writes all entries using a temporary file in the same directory
    /// followed by a rename.
    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            NoteboardError::Io(e)
        })?;

        let json = serde_json::to_string_pretty(entries)?;

        temp_file.write_all(json.as_bytes()).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            NoteboardError::Io(e)
        })?;

        temp_file.flush().map_err(|e| {
            error!("Failed to flush temporary file: {}", e);
            NoteboardError::Io(e)
        })?;

        temp_file.persist(&self.path).map_err(|e| {
            error!(
                "Failed to persist store file {}: {}",
                self.path.display(),
                e.error
            );
            NoteboardError::Io(e.error)
        })?;

        trace!("Store file {} written", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// Store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Reads the note list, or an empty list when none has been stored
pub fn read_notes<S: KeyValueStore>(store: &S) -> Result<Vec<Note>> {
    match store.get(NOTES_KEY)? {
        Some(raw) => Ok(decode_notes(&raw)),
        None => {
            debug!("No stored notes found");
            Ok(Vec::new())
        }
    }
}

/// Overwrites the stored note list with `notes`
pub fn write_notes<S: KeyValueStore>(store: &S, notes: &[Note]) -> Result<()> {
    let json = serde_json::to_string(notes).map_err(|e| {
        error!("Failed to serialize notes: {}", e);
        NoteboardError::Serialization(e)
    })?;
    store.set(NOTES_KEY, json)?;
    debug!("Persisted {} notes", notes.len());
    Ok(())
}

/// Reads the session flag; absent or unreadable values count as logged out
pub fn read_logged_in<S: KeyValueStore>(store: &S) -> Result<bool> {
    match store.get(LOGGED_IN_KEY)? {
        Some(raw) => match serde_json::from_str::<bool>(&raw) {
            Ok(flag) => Ok(flag),
            Err(e) => {
                warn!("Stored session flag {:?} is not a boolean: {}", raw, e);
                Ok(false)
            }
        },
        None => Ok(false),
    }
}

pub fn write_logged_in<S: KeyValueStore>(store: &S, logged_in: bool) -> Result<()> {
    store.set(LOGGED_IN_KEY, serde_json::to_string(&logged_in)?)?;
    debug!("Persisted session flag: {}", logged_in);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;
    use crate::{Position, DEFAULT_COLOR};

    fn sample_notes() -> Vec<Note> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut first = Note::new(
            10,
            "first".into(),
            "body".into(),
            "#ffcc00".into(),
            vec!["a".into(), "".into()],
            date,
        );
        first.comments.push("  spaced ".into());
        first.position = Position::new(-15.5, 1200.0);
        let second = Note::new(
            11,
            "second".into(),
            "body".into(),
            DEFAULT_COLOR.into(),
            Vec::new(),
            date.succ_opt().unwrap(),
        );
        vec![first, second]
    }

    #[test]
    fn note_list_round_trips_through_store() {
        let store = MemoryStore::new();
        let notes = sample_notes();

        write_notes(&store, &notes).unwrap();
        assert_eq!(read_notes(&store).unwrap(), notes);
    }

    #[test]
    fn missing_keys_read_as_defaults() {
        let store = MemoryStore::new();
        assert!(read_notes(&store).unwrap().is_empty());
        assert!(!read_logged_in(&store).unwrap());
    }

    #[test]
    fn session_flag_is_stored_as_json_boolean() {
        let store = MemoryStore::new();
        write_logged_in(&store, true).unwrap();
        assert_eq!(store.get(LOGGED_IN_KEY).unwrap().as_deref(), Some("true"));
        assert!(read_logged_in(&store).unwrap());

        store.set(LOGGED_IN_KEY, "yes".into()).unwrap();
        assert!(!read_logged_in(&store).unwrap());
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v".into()).unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
        other.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_persists_between_handles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::open(&path).unwrap();
        write_notes(&store, &sample_notes()).unwrap();
        write_logged_in(&store, true).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(read_notes(&reopened).unwrap(), sample_notes());
        assert!(read_logged_in(&reopened).unwrap());

        reopened.remove(LOGGED_IN_KEY).unwrap();
        assert!(!read_logged_in(&store).unwrap());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "garbage").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(NOTES_KEY).unwrap(), None);

        store.set("k", "v".into()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
