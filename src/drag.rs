//! Pointer drag-and-drop of notes across the canvas.
//!
//! Follows the native drag event sequence: `drag_start` on the note,
//! `drag_over` on the canvas for every pointer move, then `drop` on the
//! canvas. The drop point is taken relative to the canvas's top-left
//! corner and is not clamped to the canvas bounds.
use log::{debug, trace};

use crate::{KeyValueStore, NoteId, NoteRepository, Position, Result};

#[derive(Debug, Default)]
pub struct DragController {
    dragging: Option<NoteId>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The note currently being dragged
    pub fn dragging(&self) -> Option<NoteId> {
        self.dragging
    }

    pub fn drag_start(&mut self, id: NoteId) {
        debug!("Drag started for note {}", id);
        self.dragging = Some(id);
    }

    /// Called for every pointer move over the canvas.
    ///
    /// `true` while a note is being dragged, telling the host to suppress
    /// its default handling so the canvas accepts the drop.
    pub fn drag_over(&self) -> bool {
        self.dragging.is_some()
    }

    /// Abandons the drag without moving anything
    pub fn drag_end(&mut self) {
        if let Some(id) = self.dragging.take() {
            trace!("Drag of note {} ended without a drop", id);
        }
    }

    /// Commits the dragged note at `pointer - canvas_origin`.
    ///
    /// Returns the committed position, or `None` when no drag is in progress.
    pub fn drop<S: KeyValueStore>(
        &mut self,
        repository: &mut NoteRepository<S>,
        pointer: Position,
        canvas_origin: Position,
    ) -> Result<Option<Position>> {
        let Some(id) = self.dragging.take() else {
            trace!("Drop ignored, nothing is being dragged");
            return Ok(None);
        };

        let position = Position::new(pointer.x - canvas_origin.x, pointer.y - canvas_origin.y);
        repository.reposition(id, position.x, position.y)?;
        debug!("Dropped note {} at ({}, {})", id, position.x, position.y);

        Ok(Some(position))
    }
}
