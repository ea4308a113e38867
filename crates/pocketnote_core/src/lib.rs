//! Core of the PocketNote notes app.
//! Owns the note store contract, search filter, editor state machine and
//! the shell wiring them together; hosts supply rendering, navigation and
//! dialogs.

pub mod config;
pub mod confirm;
pub mod db;
pub mod logging;
pub mod model;
pub mod nav;
pub mod screen;
pub mod search;
pub mod shell;
pub mod store;

pub use config::{open_store, AppConfig, ConfigError, CreateFlow};
pub use confirm::{
    confirmer_for, AlertAction, AlertActionStyle, AlertConfirm, AlertDialog,
    ConfirmDestructiveAction, ConfirmStyle, DialogPresenter, HostPlatform, ModalConfirm,
    PresetConfirm, DELETE_NOTE_MESSAGE, DELETE_NOTE_TITLE,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteDraft, NoteId, ValidationError};
pub use nav::{
    EditorParams, HeaderAction, Navigator, Route, ScreenName, ScreenOptions, StackNavigator,
};
pub use screen::editor::{EditorError, EditorMode, EditorOutcome, NoteEditor, SavePolicy};
pub use screen::note_list::{content_preview, ListStatus, NoteListEntry, NoteListView};
pub use search::filter::filter_notes;
pub use shell::{screen_options, AppShell, ShellError, INITIAL_SCREEN, SCREENS};
pub use store::client::{Request, RequestState, StoreClient};
pub use store::memory::MemoryNoteStore;
pub use store::note_store::{NoteStore, StoreError, StoreResult};
pub use store::sqlite::SqliteNoteStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
