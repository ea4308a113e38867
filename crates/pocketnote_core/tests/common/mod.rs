#![allow(dead_code)]

use pocketnote_core::{
    AlertDialog, DialogPresenter, MemoryNoteStore, Note, NoteDraft, NoteId, NoteStore,
    StoreError, StoreResult,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Store call as observed by `RecordingStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Add(NoteDraft),
    Update(Note),
    Delete(Note),
    Get(NoteId),
}

pub type CallLog = Rc<RefCell<Vec<StoreCall>>>;

/// Memory store that records every call and can be told to fail lists or adds.
pub struct RecordingStore {
    inner: MemoryNoteStore,
    calls: CallLog,
    fail_lists: bool,
    fail_adds: Rc<Cell<bool>>,
}

impl RecordingStore {
    pub fn new(notes: Vec<Note>) -> (Self, CallLog) {
        let calls = CallLog::default();
        let store = Self {
            inner: MemoryNoteStore::with_notes(notes),
            calls: Rc::clone(&calls),
            fail_lists: false,
            fail_adds: Rc::default(),
        };
        (store, calls)
    }

    pub fn failing_lists() -> (Self, CallLog) {
        let (mut store, calls) = Self::new(Vec::new());
        store.fail_lists = true;
        (store, calls)
    }

    /// Adds fail while the returned switch is `true`.
    pub fn failing_adds() -> (Self, CallLog, Rc<Cell<bool>>) {
        let (store, calls) = Self::new(Vec::new());
        store.fail_adds.set(true);
        let switch = Rc::clone(&store.fail_adds);
        (store, calls, switch)
    }
}

impl NoteStore for RecordingStore {
    fn list_notes(&self, filter_hint: &str) -> StoreResult<Vec<Note>> {
        self.calls.borrow_mut().push(StoreCall::List);
        if self.fail_lists {
            return Err(StoreError::InvalidData("list unavailable".to_string()));
        }
        self.inner.list_notes(filter_hint)
    }

    fn add_note(&mut self, draft: &NoteDraft) -> StoreResult<Note> {
        self.calls.borrow_mut().push(StoreCall::Add(draft.clone()));
        if self.fail_adds.get() {
            return Err(StoreError::InvalidData("add unavailable".to_string()));
        }
        self.inner.add_note(draft)
    }

    fn update_note(&mut self, note: &Note) -> StoreResult<()> {
        self.calls.borrow_mut().push(StoreCall::Update(note.clone()));
        self.inner.update_note(note)
    }

    fn delete_note(&mut self, note: &Note) -> StoreResult<()> {
        self.calls.borrow_mut().push(StoreCall::Delete(note.clone()));
        self.inner.delete_note(note)
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        self.calls.borrow_mut().push(StoreCall::Get(id));
        self.inner.get_note(id)
    }
}

/// Calls other than list/get, in order.
pub fn writes(calls: &CallLog) -> Vec<StoreCall> {
    calls
        .borrow()
        .iter()
        .filter(|call| !matches!(call, StoreCall::List | StoreCall::Get(_)))
        .cloned()
        .collect()
}

pub fn note(title: &str, content: &str) -> Note {
    Note::from_draft(uuid::Uuid::new_v4(), NoteDraft::new(title, content))
}

/// The two-note collection used across scenarios.
pub fn groceries_and_work() -> (Note, Note) {
    (note("Groceries", "milk, eggs"), note("Work", "standup notes"))
}

/// Presenter answering every dialog the same way.
pub struct FixedPresenter {
    pub accept: bool,
    pub shown: Rc<RefCell<u32>>,
}

impl FixedPresenter {
    pub fn new(accept: bool) -> (Self, Rc<RefCell<u32>>) {
        let shown = Rc::new(RefCell::new(0));
        (
            Self {
                accept,
                shown: Rc::clone(&shown),
            },
            shown,
        )
    }
}

impl DialogPresenter for FixedPresenter {
    fn show_modal(&mut self, _message: &str) -> bool {
        *self.shown.borrow_mut() += 1;
        self.accept
    }

    fn show_alert(&mut self, alert: &AlertDialog) -> Option<usize> {
        *self.shown.borrow_mut() += 1;
        if self.accept {
            alert.actions.iter().position(|action| action.label == "Delete")
        } else {
            Some(0)
        }
    }
}
