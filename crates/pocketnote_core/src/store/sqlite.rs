//! SQLite-backed note store.
//!
//! # Responsibility
//! - Persist notes in the `notes` table created by migrations.
//! - Map SQLite rows to `Note` and reject rows with malformed ids.
//!
//! # Invariants
//! - `list_notes` returns notes in insertion order (`rowid ASC`).
//! - Delete is a hard delete; deleting a missing row succeeds.

use crate::db::{open_db, open_db_in_memory};
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::store::note_store::{NoteStore, StoreError, StoreResult};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT uuid, title, content FROM notes";

/// Note store owning one SQLite connection for its whole lifetime.
pub struct SqliteNoteStore {
    conn: Connection,
}

impl SqliteNoteStore {
    /// Opens a file-backed store, creating and migrating it when needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl NoteStore for SqliteNoteStore {
    fn list_notes(&self, _filter_hint: &str) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn add_note(&mut self, draft: &NoteDraft) -> StoreResult<Note> {
        let note = Note::from_draft(Uuid::new_v4(), draft.clone());
        self.conn.execute(
            "INSERT INTO notes (uuid, title, content) VALUES (?1, ?2, ?3);",
            params![note.id.to_string(), note.title.as_str(), note.content.as_str()],
        )?;
        debug!("event=note_insert module=store status=ok note_id={}", note.id);
        Ok(note)
    }

    fn update_note(&mut self, note: &Note) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?2,
                content = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![note.id.to_string(), note.title.as_str(), note.content.as_str()],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(note.id));
        }
        Ok(())
    }

    fn delete_note(&mut self, note: &Note) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE uuid = ?1;", [note.id.to_string()])?;
        debug!(
            "event=note_delete module=store status=ok note_id={} removed={changed}",
            note.id
        );
        Ok(())
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_note_row(row)?)),
            None => Ok(None),
        }
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<Note> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{uuid_text}` in notes.uuid"))
    })?;

    Ok(Note {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
    })
}
