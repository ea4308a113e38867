//! Note and draft records.
//!
//! # Responsibility
//! - Define the canonical `Note` shape (id + title + content).
//! - Provide submit-time validation for editor drafts.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - Title and content may be empty on a stored note; only submit enforces
//!   non-empty fields.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable store-assigned identifier for a note.
pub type NoteId = Uuid;

/// A note as known by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Builds a note from an existing id and draft fields.
    pub fn from_draft(id: NoteId, draft: NoteDraft) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
        }
    }

    /// Returns a draft copy of this note's editable fields.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

/// Editable fields without identity.
///
/// Used as `add` input and as the editor's local working copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks that both fields are non-empty.
    ///
    /// Whitespace counts as content; fields are not trimmed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.title.is_empty(), self.content.is_empty()) {
            (false, false) => Ok(()),
            (true, false) => Err(ValidationError::EmptyTitle),
            (false, true) => Err(ValidationError::EmptyContent),
            (true, true) => Err(ValidationError::EmptyTitleAndContent),
        }
    }
}

/// Submit-time draft validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    EmptyContent,
    EmptyTitleAndContent,
}

impl ValidationError {
    /// Message shown inline in the editor.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::EmptyTitle => "Please enter a title.",
            Self::EmptyContent => "Please enter some content.",
            Self::EmptyTitleAndContent => "Please enter a title and some content.",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::EmptyContent => write!(f, "note content must not be empty"),
            Self::EmptyTitleAndContent => {
                write!(f, "note title and content must not be empty")
            }
        }
    }
}

impl Error for ValidationError {}
