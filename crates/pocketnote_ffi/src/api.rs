//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note list/search, submit, live update and delete to Dart.
//! - Describe the per-platform delete confirmation so Dart can render it.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Every call drains its store work before returning.
//! - Deletes only run when the caller reports an affirmed confirmation.

use log::warn;
use pocketnote_core::{
    content_preview, core_version as core_version_inner, filter_notes,
    init_logging as init_logging_inner, AlertDialog, ConfirmStyle, EditorError, EditorOutcome,
    HostPlatform, Note, NoteDraft, NoteEditor, NoteId, PresetConfirm, RequestState, SavePolicy,
    SqliteNoteStore, StoreClient, StoreError, DELETE_NOTE_MESSAGE, DELETE_NOTE_TITLE,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const NOTES_DB_FILE_NAME: &str = "pocketnote.sqlite3";
static NOTES_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// List row returned to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub note_id: String,
    pub title: String,
    pub content: String,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    /// `false` when the store could not be read; `items` is then empty.
    pub ok: bool,
    pub items: Vec<NoteItem>,
    pub message: String,
}

/// Outcome of a write-side call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    pub note_id: Option<String>,
    /// Inline message for the editor (validation) or diagnostics.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Dialog Dart should show before calling `note_delete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmationSpec {
    /// `modal` or `alert`.
    pub style: String,
    pub title: String,
    pub message: String,
    /// Button labels in display order.
    pub buttons: Vec<String>,
}

/// Lists notes matching `query` (case-insensitive substring).
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(query: String) -> NotesListResponse {
    let client = match open_client() {
        Ok(client) => client,
        Err(err) => return list_failure(&err),
    };
    let request = client.list_notes("");
    client.run_pending();

    match request.into_state() {
        RequestState::Succeeded(notes) => {
            let items = filter_notes(&notes, &query)
                .into_iter()
                .map(to_note_item)
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Found {} note(s).", items.len())
            };
            NotesListResponse {
                ok: true,
                items,
                message,
            }
        }
        RequestState::Failed(err) => list_failure(&err),
        RequestState::Pending => list_failure(&StoreError::Disposed),
    }
}

/// Buffered submit: creates when `note_id` is `None`, otherwise updates.
///
/// Empty title or content is rejected with the inline validation message.
/// Creation does not report the new id; Dart re-lists after submit.
#[flutter_rust_bridge::frb(sync)]
pub fn note_submit(note_id: Option<String>, title: String, content: String) -> NoteActionResponse {
    let client = match open_client() {
        Ok(client) => client,
        Err(err) => return NoteActionResponse::failure(format!("note_submit failed: {err}")),
    };

    let mut editor = match note_id {
        Some(raw) => match load_existing(&client, &raw) {
            Ok(note) => NoteEditor::edit(client.clone(), note, SavePolicy::Buffered),
            Err(message) => return NoteActionResponse::failure(message),
        },
        None => match NoteEditor::create(client.clone(), SavePolicy::Buffered) {
            Ok(editor) => editor,
            Err(err) => return NoteActionResponse::failure(format!("note_submit failed: {err}")),
        },
    };
    let existing_id = editor.note_id();

    let submitted = editor
        .set_title(title)
        .and_then(|()| editor.set_content(content))
        .and_then(|()| editor.submit());
    match submitted {
        Ok(_) => {}
        Err(EditorError::Validation(err)) => {
            return NoteActionResponse::failure(err.user_message());
        }
        Err(err) => return NoteActionResponse::failure(format!("note_submit failed: {err}")),
    }
    client.run_pending();

    match existing_id {
        Some(id) => NoteActionResponse::success("Note updated.", Some(id.to_string())),
        None => NoteActionResponse::success("Note created.", None),
    }
}

/// Store-first creation: adds an empty note and returns its id.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create_empty() -> NoteActionResponse {
    let client = match open_client() {
        Ok(client) => client,
        Err(err) => return NoteActionResponse::failure(format!("note_create_empty failed: {err}")),
    };
    let request = client.add_note(NoteDraft::default());
    client.run_pending();

    match request.into_state() {
        RequestState::Succeeded(note) => {
            NoteActionResponse::success("Note created.", Some(note.id.to_string()))
        }
        RequestState::Failed(err) => {
            NoteActionResponse::failure(format!("note_create_empty failed: {err}"))
        }
        RequestState::Pending => NoteActionResponse::failure("note_create_empty did not run"),
    }
}

/// Live save for one field change on an existing note.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update_live(note_id: String, title: String, content: String) -> NoteActionResponse {
    let client = match open_client() {
        Ok(client) => client,
        Err(err) => return NoteActionResponse::failure(format!("note_update_live failed: {err}")),
    };
    let note = match load_existing(&client, &note_id) {
        Ok(note) => note,
        Err(message) => return NoteActionResponse::failure(message),
    };
    let id = note.id;

    let mut editor = NoteEditor::edit(client.clone(), note, SavePolicy::Live);
    if editor.draft().title != title {
        if let Err(err) = editor.set_title(title) {
            return NoteActionResponse::failure(format!("note_update_live failed: {err}"));
        }
    }
    if editor.draft().content != content {
        if let Err(err) = editor.set_content(content) {
            return NoteActionResponse::failure(format!("note_update_live failed: {err}"));
        }
    }
    editor.cancel();
    client.run_pending();
    NoteActionResponse::success("Note saved.", Some(id.to_string()))
}

/// Deletes a note after Dart collected the user's confirmation.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String, confirmed: bool) -> NoteActionResponse {
    let client = match open_client() {
        Ok(client) => client,
        Err(err) => return NoteActionResponse::failure(format!("note_delete failed: {err}")),
    };
    let note = match load_note(&client, &note_id) {
        Ok(Some(note)) => note,
        // Already gone: deletion is idempotent.
        Ok(None) => return NoteActionResponse::success("Note deleted.", Some(note_id)),
        Err(message) => return NoteActionResponse::failure(message),
    };

    let mut editor = NoteEditor::edit(client.clone(), note, SavePolicy::Buffered);
    match editor.delete(&mut PresetConfirm(confirmed)) {
        Ok(EditorOutcome::Closed) => {
            client.run_pending();
            NoteActionResponse::success("Note deleted.", Some(note_id))
        }
        Ok(EditorOutcome::Active) => NoteActionResponse::failure("Delete cancelled."),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

/// Describes the delete confirmation for `platform` (`web|ios|android`).
///
/// Unknown platforms fall back to the native alert.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_confirmation(platform: String) -> DeleteConfirmationSpec {
    let platform = HostPlatform::parse(&platform).unwrap_or_else(|err| {
        warn!("event=delete_confirmation module=ffi status=fallback error={err}");
        HostPlatform::Android
    });

    match platform.confirm_style() {
        ConfirmStyle::Modal => DeleteConfirmationSpec {
            style: "modal".to_string(),
            title: String::new(),
            message: DELETE_NOTE_MESSAGE.to_string(),
            buttons: vec!["Cancel".to_string(), "OK".to_string()],
        },
        ConfirmStyle::Alert => {
            let alert = AlertDialog::destructive(DELETE_NOTE_TITLE, DELETE_NOTE_MESSAGE);
            DeleteConfirmationSpec {
                style: "alert".to_string(),
                title: alert.title,
                message: alert.message,
                buttons: alert.actions.into_iter().map(|action| action.label).collect(),
            }
        }
    }
}

fn resolve_notes_db_path() -> PathBuf {
    NOTES_DB_PATH
        .get_or_init(|| notes_db_path_from(|key| std::env::var(key).ok()))
        .clone()
}

/// `POCKETNOTE_DB_PATH` when set and non-blank, else the temp dir.
fn notes_db_path_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup(pocketnote_core::config::ENV_DB_PATH)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(NOTES_DB_FILE_NAME))
}

fn open_client() -> Result<StoreClient, StoreError> {
    let store = SqliteNoteStore::open(resolve_notes_db_path())?;
    Ok(StoreClient::new(store))
}

fn parse_note_id(raw: &str) -> Result<NoteId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid note id `{raw}`"))
}

fn load_note(client: &StoreClient, raw: &str) -> Result<Option<Note>, String> {
    let id = parse_note_id(raw)?;
    let request = client.get_note(id);
    client.run_pending();
    match request.into_state() {
        RequestState::Succeeded(note) => Ok(note),
        RequestState::Failed(err) => Err(format!("note lookup failed: {err}")),
        RequestState::Pending => Err("note lookup did not run".to_string()),
    }
}

fn load_existing(client: &StoreClient, raw: &str) -> Result<Note, String> {
    load_note(client, raw)?.ok_or_else(|| format!("note not found: {}", raw.trim()))
}

fn list_failure(err: &StoreError) -> NotesListResponse {
    NotesListResponse {
        ok: false,
        items: Vec::new(),
        message: format!("notes_list failed: {err}"),
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        note_id: note.id.to_string(),
        title: note.title.clone(),
        content: note.content.clone(),
        preview: content_preview(&note.content),
    }
}
