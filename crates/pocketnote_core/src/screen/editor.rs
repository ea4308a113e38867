//! Note editor state machine.
//!
//! # Responsibility
//! - Own the draft for exactly one note being created or edited.
//! - Apply the configured save policy to field changes.
//! - Gate deletion behind destructive-action confirmation.
//!
//! # Invariants
//! - `Live` editors always hold a stored note; they cannot start in create
//!   mode.
//! - Rejected submits and declined deletes leave the draft untouched.
//! - Once closed, the editor issues no further store requests.

use crate::confirm::{ConfirmDestructiveAction, DELETE_NOTE_MESSAGE};
use crate::model::note::{Note, NoteDraft, NoteId, ValidationError};
use crate::nav::EditorParams;
use crate::store::client::StoreClient;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// When field changes reach the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SavePolicy {
    /// Changes stay local until `submit`.
    #[default]
    Buffered,
    /// Every change issues an update.
    Live,
}

impl SavePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buffered => "buffered",
            Self::Live => "live",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

impl EditorMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
        }
    }
}

/// Result of an editor action that may end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Editor stays on screen.
    Active,
    /// Editor is done; the host should return to the list.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Submit rejected because a field is empty.
    Validation(ValidationError),
    /// Editor already closed.
    Closed,
    /// Delete requested while creating a new note.
    NoNoteLoaded,
    /// Live saving needs an existing note id.
    LiveRequiresExistingNote,
    /// Live editors have nothing to submit.
    SubmitRequiresBufferedPolicy,
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Closed => write!(f, "editor is closed"),
            Self::NoNoteLoaded => write!(f, "no stored note is loaded in the editor"),
            Self::LiveRequiresExistingNote => {
                write!(f, "live save policy requires an existing note")
            }
            Self::SubmitRequiresBufferedPolicy => {
                write!(f, "submit is only available with the buffered save policy")
            }
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for EditorError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

pub struct NoteEditor {
    client: StoreClient,
    policy: SavePolicy,
    loaded: Option<Note>,
    draft: NoteDraft,
    validation: Option<ValidationError>,
    closed: bool,
}

impl NoteEditor {
    /// Opens an empty draft for a note that does not exist yet.
    pub fn create(client: StoreClient, policy: SavePolicy) -> Result<Self, EditorError> {
        if policy == SavePolicy::Live {
            return Err(EditorError::LiveRequiresExistingNote);
        }
        debug!("event=editor_open module=editor mode=create policy={}", policy.as_str());
        Ok(Self {
            client,
            policy,
            loaded: None,
            draft: NoteDraft::default(),
            validation: None,
            closed: false,
        })
    }

    /// Opens a draft copy of a stored note.
    pub fn edit(client: StoreClient, note: Note, policy: SavePolicy) -> Self {
        debug!(
            "event=editor_open module=editor mode=edit policy={} note_id={}",
            policy.as_str(),
            note.id
        );
        Self {
            client,
            policy,
            draft: note.to_draft(),
            loaded: Some(note),
            validation: None,
            closed: false,
        }
    }

    /// Opens the editor from navigation parameters.
    pub fn open(
        client: StoreClient,
        params: EditorParams,
        policy: SavePolicy,
    ) -> Result<Self, EditorError> {
        match params.note {
            Some(note) => Ok(Self::edit(client, note, policy)),
            None => Self::create(client, policy),
        }
    }

    pub fn mode(&self) -> EditorMode {
        if self.loaded.is_some() {
            EditorMode::Edit
        } else {
            EditorMode::Create
        }
    }

    pub fn policy(&self) -> SavePolicy {
        self.policy
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn loaded_note(&self) -> Option<&Note> {
        self.loaded.as_ref()
    }

    pub fn note_id(&self) -> Option<NoteId> {
        self.loaded.as_ref().map(|note| note.id)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Inline message left by the last rejected submit.
    pub fn validation_message(&self) -> Option<&'static str> {
        self.validation.map(ValidationError::user_message)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.draft.title = title.into();
        self.after_change();
        Ok(())
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.draft.content = content.into();
        self.after_change();
        Ok(())
    }

    /// Writes the draft (add in create mode, update in edit mode) and closes.
    ///
    /// On validation failure the editor stays open and keeps the message.
    pub fn submit(&mut self) -> Result<EditorOutcome, EditorError> {
        self.ensure_open()?;
        if self.policy != SavePolicy::Buffered {
            return Err(EditorError::SubmitRequiresBufferedPolicy);
        }

        if let Err(err) = self.draft.validate() {
            info!(
                "event=note_submit module=editor status=rejected mode={} reason={:?}",
                self.mode().as_str(),
                err
            );
            self.validation = Some(err);
            return Err(err.into());
        }
        self.validation = None;

        match &self.loaded {
            Some(note) => {
                let updated = Note::from_draft(note.id, self.draft.clone());
                self.client.update_note(updated);
            }
            None => {
                self.client.add_note(self.draft.clone());
            }
        }
        info!(
            "event=note_submit module=editor status=ok mode={} title_len={} content_len={}",
            self.mode().as_str(),
            self.draft.title.chars().count(),
            self.draft.content.chars().count()
        );
        self.closed = true;
        Ok(EditorOutcome::Closed)
    }

    /// Deletes the loaded note once `confirm` affirms.
    ///
    /// A declined prompt returns `Active` and changes nothing. A confirmed
    /// delete closes the editor without waiting for the store.
    pub fn delete(
        &mut self,
        confirm: &mut dyn ConfirmDestructiveAction,
    ) -> Result<EditorOutcome, EditorError> {
        self.ensure_open()?;
        let Some(note) = self.loaded.as_ref() else {
            return Err(EditorError::NoNoteLoaded);
        };

        if !confirm.confirm_destructive_action(DELETE_NOTE_MESSAGE) {
            info!(
                "event=note_delete module=editor status=declined note_id={}",
                note.id
            );
            return Ok(EditorOutcome::Active);
        }

        self.client.delete_note(note.clone());
        info!(
            "event=note_delete module=editor status=confirmed note_id={}",
            note.id
        );
        self.closed = true;
        Ok(EditorOutcome::Closed)
    }

    /// Leaves the editor without submitting the draft.
    pub fn cancel(&mut self) -> EditorOutcome {
        if !self.closed {
            debug!("event=editor_cancel module=editor mode={}", self.mode().as_str());
            self.closed = true;
        }
        EditorOutcome::Closed
    }

    fn ensure_open(&self) -> Result<(), EditorError> {
        if self.closed {
            return Err(EditorError::Closed);
        }
        Ok(())
    }

    fn after_change(&mut self) {
        self.validation = None;
        if self.policy != SavePolicy::Live {
            return;
        }
        // Live editors are only constructed in edit mode.
        if let Some(note) = &self.loaded {
            self.client
                .update_note(Note::from_draft(note.id, self.draft.clone()));
        }
    }
}
