//! Note list screen state.
//!
//! # Responsibility
//! - Track the store's note collection through a list request.
//! - Apply the search filter and project notes into list entries.
//!
//! # Invariants
//! - Nothing is rendered before the first successful fetch.
//! - A refresh keeps the last loaded collection until the new one lands;
//!   superseded responses are ignored.

use crate::model::note::{Note, NoteId};
use crate::search::filter::filter_notes;
use crate::store::client::{Request, RequestState, StoreClient};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListEntry {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Single-line content summary.
    pub preview: String,
}

impl NoteListEntry {
    fn from_note(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            preview: content_preview(&note.content),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    /// First fetch has not completed.
    Loading,
    /// Store failed before any collection was loaded.
    Unavailable(String),
    Ready,
}

pub struct NoteListView {
    client: StoreClient,
    query: String,
    inflight: Option<Request<Vec<Note>>>,
    notes: Option<Vec<Note>>,
    last_error: Option<String>,
}

impl NoteListView {
    /// Creates the view and issues the first fetch.
    pub fn new(client: StoreClient) -> Self {
        let mut view = Self {
            client,
            query: String::new(),
            inflight: None,
            notes: None,
            last_error: None,
        };
        view.refresh();
        view
    }

    /// Re-fetches the collection, replacing any in-flight fetch.
    pub fn refresh(&mut self) {
        // Filtering happens client-side, so no hint is sent.
        self.inflight = Some(self.client.list_notes(""));
    }

    /// Absorbs a completed fetch, if any. Returns `true` when state changed.
    pub fn sync(&mut self) -> bool {
        let Some(request) = self.inflight.take() else {
            return false;
        };
        if request.is_pending() {
            self.inflight = Some(request);
            return false;
        }

        match request.into_state() {
            RequestState::Succeeded(notes) => {
                debug!("event=list_loaded module=list status=ok count={}", notes.len());
                self.notes = Some(notes);
                self.last_error = None;
            }
            RequestState::Failed(err) => {
                warn!("event=list_loaded module=list status=error error={err}");
                self.last_error = Some(err.to_string());
            }
            RequestState::Pending => return false,
        }
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn status(&self) -> ListStatus {
        match (&self.notes, &self.last_error) {
            (Some(_), _) => ListStatus::Ready,
            (None, Some(message)) => ListStatus::Unavailable(message.clone()),
            (None, None) => ListStatus::Loading,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.inflight.is_some()
    }

    /// Filtered entries, or `None` while no collection is available.
    pub fn entries(&self) -> Option<Vec<NoteListEntry>> {
        let notes = self.notes.as_ref()?;
        Some(
            filter_notes(notes, &self.query)
                .into_iter()
                .map(NoteListEntry::from_note)
                .collect(),
        )
    }

    /// Looks up a loaded note for selection.
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.as_ref()?.iter().find(|note| note.id == id)
    }
}

/// Collapses whitespace and caps the content for a one-line preview.
pub fn content_preview(content: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(content, " ");
    collapsed.trim().chars().take(PREVIEW_MAX_CHARS).collect()
}
