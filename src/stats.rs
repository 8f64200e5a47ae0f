use crate::{DayCount, Note};

/// Counts notes per creation day.
///
/// Days appear in the order they are first met while scanning `notes`.
pub fn notes_per_day(notes: &[Note]) -> Vec<DayCount> {
    let mut counts: Vec<DayCount> = Vec::new();

    for note in notes {
        match counts.iter_mut().find(|entry| entry.date == note.created_at) {
            Some(entry) => entry.count += 1,
            None => counts.push(DayCount {
                date: note.created_at,
                count: 1,
            }),
        }
    }

    counts
}
