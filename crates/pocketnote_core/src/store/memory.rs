//! In-memory note store.
//!
//! Keeps insertion order. Used for tests and hosts without a database.

use crate::model::note::{Note, NoteDraft, NoteId};
use crate::store::note_store::{NoteStore, StoreError, StoreResult};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Vec<Note>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing notes, keeping their ids.
    pub fn with_notes(notes: impl IntoIterator<Item = Note>) -> Self {
        Self {
            notes: notes.into_iter().collect(),
        }
    }
}

impl NoteStore for MemoryNoteStore {
    fn list_notes(&self, _filter_hint: &str) -> StoreResult<Vec<Note>> {
        Ok(self.notes.clone())
    }

    fn add_note(&mut self, draft: &NoteDraft) -> StoreResult<Note> {
        let note = Note::from_draft(Uuid::new_v4(), draft.clone());
        self.notes.push(note.clone());
        Ok(note)
    }

    fn update_note(&mut self, note: &Note) -> StoreResult<()> {
        let existing = self
            .notes
            .iter_mut()
            .find(|current| current.id == note.id)
            .ok_or(StoreError::NotFound(note.id))?;
        existing.title.clone_from(&note.title);
        existing.content.clone_from(&note.content);
        Ok(())
    }

    fn delete_note(&mut self, note: &Note) -> StoreResult<()> {
        self.notes.retain(|current| current.id != note.id);
        Ok(())
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        Ok(self.notes.iter().find(|note| note.id == id).cloned())
    }
}
