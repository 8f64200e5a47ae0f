use log::{debug, trace, warn};

use crate::Note;

/// Splits comma-separated tag input, trimming each token.
///
/// Empty tokens are kept, so `"a,,b"` gives `["a", "", "b"]` and an empty
/// input gives a single empty tag.
pub fn parse_tags(input: &str) -> Vec<String> {
    input.split(',').map(|s| s.trim().to_string()).collect()
}

/// Joins tags back into the form's display format
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Decodes the persisted note list, skipping entries that cannot be read.
///
/// A value that is not a JSON array decodes to an empty list.
pub fn decode_notes(raw: &str) -> Vec<Note> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Stored note list is not a JSON array, ignoring it: {}", e);
            return Vec::new();
        }
    };

    let total = entries.len();
    let notes: Vec<Note> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Note>(entry) {
            Ok(note) => {
                trace!("Decoded stored note {}", note.id);
                Some(note)
            }
            Err(e) => {
                warn!("Skipping stored note at index {}: {}", index, e);
                None
            }
        })
        .collect();

    debug!("Decoded {} of {} stored notes", notes.len(), total);
    notes
}
