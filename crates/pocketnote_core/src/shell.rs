//! App shell wiring store, list and editor.
//!
//! # Responsibility
//! - Own the store client from `start` to `shutdown`.
//! - Declare the two screens and their chrome.
//! - Route list selections and the new-note control into the editor, and
//!   return to a refreshed list when the editor closes.
//!
//! # Invariants
//! - At most one editor is open at a time.
//! - The list is always the root screen.

use crate::config::{AppConfig, ConfigError, CreateFlow};
use crate::confirm::ConfirmDestructiveAction;
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::nav::{EditorParams, HeaderAction, Navigator, Route, ScreenName, ScreenOptions};
use crate::screen::editor::{EditorError, EditorMode, EditorOutcome, NoteEditor};
use crate::screen::note_list::NoteListView;
use crate::store::client::{Request, RequestState, StoreClient};
use crate::store::note_store::NoteStore;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Screens the shell can show, in declaration order.
pub const SCREENS: [ScreenName; 2] = [ScreenName::List, ScreenName::Editor];
pub const INITIAL_SCREEN: ScreenName = ScreenName::List;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    Editor(EditorError),
    Config(ConfigError),
    /// An editor action arrived while the list is showing.
    NoActiveEditor,
    /// A list action arrived while the editor is showing.
    EditorAlreadyOpen,
    /// Selected id is not in the loaded collection.
    UnknownNote(NoteId),
    /// A store-first creation is still waiting for its id.
    CreateInProgress,
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Editor(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::NoActiveEditor => write!(f, "no editor is open"),
            Self::EditorAlreadyOpen => write!(f, "an editor is already open"),
            Self::UnknownNote(id) => write!(f, "note is not in the loaded list: {id}"),
            Self::CreateInProgress => write!(f, "a new note is still being created"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Editor(err) => Some(err),
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EditorError> for ShellError {
    fn from(value: EditorError) -> Self {
        Self::Editor(value)
    }
}

impl From<ConfigError> for ShellError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Chrome for a screen. `mode` only matters for the editor.
pub fn screen_options(screen: ScreenName, mode: EditorMode) -> ScreenOptions {
    match (screen, mode) {
        (ScreenName::List, _) => ScreenOptions {
            title: "Notes".to_string(),
            header_action: Some(HeaderAction::NewNote),
        },
        (ScreenName::Editor, EditorMode::Create) => ScreenOptions {
            title: "New Note".to_string(),
            header_action: None,
        },
        (ScreenName::Editor, EditorMode::Edit) => ScreenOptions {
            title: "Edit Note".to_string(),
            header_action: Some(HeaderAction::DeleteNote),
        },
    }
}

pub struct AppShell<N: Navigator> {
    config: AppConfig,
    client: StoreClient,
    navigator: N,
    confirm: Box<dyn ConfirmDestructiveAction>,
    list: NoteListView,
    editor: Option<NoteEditor>,
    pending_create: Option<Request<Note>>,
    notice: Option<String>,
}

impl<N: Navigator> AppShell<N> {
    /// Takes ownership of the store and shows the list screen.
    pub fn start(
        config: AppConfig,
        store: Box<dyn NoteStore>,
        mut navigator: N,
        confirm: Box<dyn ConfirmDestructiveAction>,
    ) -> Result<Self, ShellError> {
        config.validate()?;
        let client = StoreClient::from_boxed(store);

        navigator.navigate_to(Route::List);
        navigator.set_screen_options(screen_options(ScreenName::List, EditorMode::Create));
        let list = NoteListView::new(client.clone());

        info!(
            "event=app_start module=shell status=ok platform={} save_policy={} create_flow={}",
            config.platform.as_str(),
            config.save_policy.as_str(),
            config.create_flow.as_str()
        );
        Ok(Self {
            config,
            client,
            navigator,
            confirm,
            list,
            editor: None,
            pending_create: None,
            notice: None,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn client(&self) -> &StoreClient {
        &self.client
    }

    pub fn list(&self) -> &NoteListView {
        &self.list
    }

    pub fn editor(&self) -> Option<&NoteEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut NoteEditor> {
        self.editor.as_mut()
    }

    pub fn current_screen(&self) -> ScreenName {
        if self.editor.is_some() {
            ScreenName::Editor
        } else {
            ScreenName::List
        }
    }

    /// Last non-fatal problem worth showing to the user.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.list.set_query(query);
    }

    /// Runs queued store work and applies its results. Returns the number of
    /// store operations executed.
    pub fn tick(&mut self) -> usize {
        let executed = self.client.run_pending();
        self.list.sync();
        self.resolve_pending_create();
        executed
    }

    /// New-note control on the list screen.
    pub fn open_new_note(&mut self) -> Result<(), ShellError> {
        self.ensure_list_showing()?;
        match self.config.create_flow {
            CreateFlow::LocalDraft => self.open_editor(EditorParams { note: None }),
            CreateFlow::StoreFirst => {
                self.pending_create = Some(self.client.add_note(NoteDraft::default()));
                Ok(())
            }
        }
    }

    /// Opens the editor on a loaded note.
    pub fn select_note(&mut self, id: NoteId) -> Result<(), ShellError> {
        self.ensure_list_showing()?;
        let note = self
            .list
            .note(id)
            .cloned()
            .ok_or(ShellError::UnknownNote(id))?;
        self.open_editor(EditorParams { note: Some(note) })
    }

    pub fn submit_editor(&mut self) -> Result<EditorOutcome, ShellError> {
        let editor = self.editor.as_mut().ok_or(ShellError::NoActiveEditor)?;
        let outcome = editor.submit()?;
        self.after_editor(outcome);
        Ok(outcome)
    }

    /// Header delete action; asks for confirmation first.
    pub fn delete_from_editor(&mut self) -> Result<EditorOutcome, ShellError> {
        let editor = self.editor.as_mut().ok_or(ShellError::NoActiveEditor)?;
        let outcome = editor.delete(&mut *self.confirm)?;
        self.after_editor(outcome);
        Ok(outcome)
    }

    /// Back navigation from the editor; buffered drafts are discarded.
    pub fn go_back(&mut self) -> Result<(), ShellError> {
        let editor = self.editor.as_mut().ok_or(ShellError::NoActiveEditor)?;
        let outcome = editor.cancel();
        self.after_editor(outcome);
        Ok(())
    }

    /// Flushes queued writes and releases the store.
    pub fn shutdown(mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.cancel();
        }
        self.client.dispose();
        info!("event=app_shutdown module=shell status=ok");
    }

    fn ensure_list_showing(&self) -> Result<(), ShellError> {
        if self.editor.is_some() {
            return Err(ShellError::EditorAlreadyOpen);
        }
        if self.pending_create.is_some() {
            return Err(ShellError::CreateInProgress);
        }
        Ok(())
    }

    fn open_editor(&mut self, params: EditorParams) -> Result<(), ShellError> {
        let editor =
            NoteEditor::open(self.client.clone(), params.clone(), self.config.save_policy)?;
        let options = screen_options(ScreenName::Editor, editor.mode());
        self.navigator.navigate_to(Route::Editor(params));
        self.navigator.set_screen_options(options);
        debug!(
            "event=nav module=shell screen={} note_id={}",
            ScreenName::Editor.as_str(),
            editor
                .note_id()
                .map_or_else(|| "none".to_string(), |id| id.to_string())
        );
        self.editor = Some(editor);
        self.notice = None;
        Ok(())
    }

    fn after_editor(&mut self, outcome: EditorOutcome) {
        if outcome != EditorOutcome::Closed {
            return;
        }
        self.editor = None;
        self.navigator.go_back();
        self.navigator
            .set_screen_options(screen_options(ScreenName::List, EditorMode::Create));
        debug!("event=nav module=shell screen={}", ScreenName::List.as_str());
        self.list.refresh();
    }

    fn resolve_pending_create(&mut self) {
        let Some(request) = self.pending_create.take() else {
            return;
        };
        if request.is_pending() {
            self.pending_create = Some(request);
            return;
        }

        match request.into_state() {
            RequestState::Succeeded(note) => {
                // The new note joins the list once the editor closes and the
                // list refreshes.
                if let Err(err) = self.open_editor(EditorParams { note: Some(note) }) {
                    warn!("event=note_create module=shell status=error error={err}");
                    self.notice = Some(err.to_string());
                }
            }
            RequestState::Failed(err) => {
                warn!("event=note_create module=shell status=error error={err}");
                self.notice = Some(format!("Could not create note: {err}"));
            }
            RequestState::Pending => {}
        }
    }
}
