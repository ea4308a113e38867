//! Store contract and store-level errors.

use crate::db::DbError;
use crate::model::note::{Note, NoteDraft, NoteId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error reported by a note store or by the client in front of it.
#[derive(Debug)]
pub enum StoreError {
    /// Update target does not exist.
    NotFound(NoteId),
    /// Persistence-layer failure.
    Db(DbError),
    /// Persisted row could not be decoded.
    InvalidData(String),
    /// Store was disposed before the request ran.
    Disposed,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::Disposed => write!(f, "note store has been disposed"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Backing store for notes.
///
/// Implementations are synchronous; `StoreClient` makes them asynchronous
/// from the screens' point of view.
pub trait NoteStore {
    /// Lists notes in store order. `filter_hint` may be ignored.
    fn list_notes(&self, filter_hint: &str) -> StoreResult<Vec<Note>>;
    /// Persists a new note and returns it with its assigned id.
    fn add_note(&mut self, draft: &NoteDraft) -> StoreResult<Note>;
    /// Replaces title and content of an existing note.
    fn update_note(&mut self, note: &Note) -> StoreResult<()>;
    /// Removes a note. Deleting an unknown note succeeds.
    fn delete_note(&mut self, note: &Note) -> StoreResult<()>;
    /// Looks up one note by id.
    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>>;
}

impl<S: NoteStore + ?Sized> NoteStore for Box<S> {
    fn list_notes(&self, filter_hint: &str) -> StoreResult<Vec<Note>> {
        (**self).list_notes(filter_hint)
    }

    fn add_note(&mut self, draft: &NoteDraft) -> StoreResult<Note> {
        (**self).add_note(draft)
    }

    fn update_note(&mut self, note: &Note) -> StoreResult<()> {
        (**self).update_note(note)
    }

    fn delete_note(&mut self, note: &Note) -> StoreResult<()> {
        (**self).delete_note(note)
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        (**self).get_note(id)
    }
}
