//! Asynchronous request handles over a note store.
//!
//! # Responsibility
//! - Queue store operations issued by screens and run them when the host
//!   pumps the client.
//! - Expose each operation as a `Request<T>` whose state moves from
//!   `Pending` to `Succeeded` or `Failed`.
//!
//! # Invariants
//! - Operations run in FIFO order, never inline with the call that issued
//!   them.
//! - Dropping a `Request` never cancels its operation; the response is
//!   discarded when it arrives.
//! - A response that cannot be written because its state is borrowed is
//!   kept and delivered on a later `run_pending`; it is never lost.
//! - After `dispose`, new requests fail immediately with
//!   `StoreError::Disposed`.

use crate::model::note::{Note, NoteDraft, NoteId};
use crate::store::note_store::{NoteStore, StoreError, StoreResult};
use log::{debug, info, warn};
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Observable state of one store request.
#[derive(Debug)]
pub enum RequestState<T> {
    Pending,
    Succeeded(T),
    Failed(StoreError),
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

type Slot<T> = Rc<RefCell<RequestState<T>>>;

/// Handle to a queued store operation.
#[derive(Debug)]
pub struct Request<T> {
    slot: Slot<T>,
}

impl<T> Request<T> {
    fn pending() -> Self {
        Self {
            slot: Rc::new(RefCell::new(RequestState::Pending)),
        }
    }

    fn failed(err: StoreError) -> Self {
        Self {
            slot: Rc::new(RefCell::new(RequestState::Failed(err))),
        }
    }

    fn downgrade(&self) -> Weak<RefCell<RequestState<T>>> {
        Rc::downgrade(&self.slot)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.borrow().is_pending()
    }

    /// Borrows the current state. A pump that completes this request while
    /// the guard is held defers delivery to the next pump.
    pub fn state(&self) -> Ref<'_, RequestState<T>> {
        self.slot.borrow()
    }

    /// Consumes the handle and returns the state it reached.
    pub fn into_state(self) -> RequestState<T> {
        self.slot.replace(RequestState::Pending)
    }
}

enum StoreOp {
    List {
        filter_hint: String,
        slot: Weak<RefCell<RequestState<Vec<Note>>>>,
    },
    Add {
        draft: NoteDraft,
        slot: Weak<RefCell<RequestState<Note>>>,
    },
    Update {
        note: Note,
        slot: Weak<RefCell<RequestState<()>>>,
    },
    Delete {
        note: Note,
        slot: Weak<RefCell<RequestState<()>>>,
    },
    Get {
        id: NoteId,
        slot: Weak<RefCell<RequestState<Option<Note>>>>,
    },
}

/// A finished result waiting for its request state to be writable.
trait Delivery {
    /// Writes the result, or hands itself back if the state is borrowed.
    fn try_deliver(self: Box<Self>) -> Option<Box<dyn Delivery>>;
}

struct Undelivered<T> {
    slot: Weak<RefCell<RequestState<T>>>,
    op: &'static str,
    result: StoreResult<T>,
}

impl<T: 'static> Delivery for Undelivered<T> {
    fn try_deliver(self: Box<Self>) -> Option<Box<dyn Delivery>> {
        let Some(cell) = self.slot.upgrade() else {
            debug!(
                "event=store_response module=store status=ignored op={} reason=handle_dropped",
                self.op
            );
            return None;
        };
        let Ok(mut state) = cell.try_borrow_mut() else {
            debug!(
                "event=store_response module=store status=deferred op={} reason=state_borrowed",
                self.op
            );
            return Some(self);
        };
        *state = match self.result {
            Ok(value) => RequestState::Succeeded(value),
            Err(err) => RequestState::Failed(err),
        };
        None
    }
}

struct ClientInner {
    store: Option<Box<dyn NoteStore>>,
    queue: VecDeque<StoreOp>,
    undelivered: Vec<Box<dyn Delivery>>,
}

/// Cloneable handle to the process-wide note store.
///
/// Clones share one store and one queue.
#[derive(Clone)]
pub struct StoreClient {
    inner: Rc<RefCell<ClientInner>>,
}

impl StoreClient {
    /// Takes ownership of a store for the lifetime of the client.
    pub fn new(store: impl NoteStore + 'static) -> Self {
        Self::from_boxed(Box::new(store))
    }

    pub fn from_boxed(store: Box<dyn NoteStore>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ClientInner {
                store: Some(store),
                queue: VecDeque::new(),
                undelivered: Vec::new(),
            })),
        }
    }

    pub fn list_notes(&self, filter_hint: &str) -> Request<Vec<Note>> {
        let filter_hint = filter_hint.to_string();
        self.enqueue(|slot| StoreOp::List { filter_hint, slot })
    }

    pub fn add_note(&self, draft: NoteDraft) -> Request<Note> {
        self.enqueue(|slot| StoreOp::Add { draft, slot })
    }

    pub fn update_note(&self, note: Note) -> Request<()> {
        self.enqueue(|slot| StoreOp::Update { note, slot })
    }

    pub fn delete_note(&self, note: Note) -> Request<()> {
        self.enqueue(|slot| StoreOp::Delete { note, slot })
    }

    pub fn get_note(&self, id: NoteId) -> Request<Option<Note>> {
        self.enqueue(|slot| StoreOp::Get { id, slot })
    }

    /// Number of queued operations not yet executed.
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().store.is_none()
    }

    /// Responses finished by the store but not yet written to their request.
    pub fn undelivered_count(&self) -> usize {
        self.inner.borrow().undelivered.len()
    }

    /// Retries deferred responses, then executes every queued operation.
    /// Returns how many operations ran.
    pub fn run_pending(&self) -> usize {
        self.redeliver();
        let mut completed = 0;
        loop {
            let mut inner = self.inner.borrow_mut();
            let Some(op) = inner.queue.pop_front() else {
                break;
            };
            let deferred = match inner.store.as_mut() {
                Some(store) => execute(&mut **store, op),
                None => reject(op),
            };
            inner.undelivered.extend(deferred);
            completed += 1;
        }
        completed
    }

    /// Drains queued writes, then releases the store.
    pub fn dispose(&self) {
        if self.is_disposed() {
            return;
        }
        let drained = self.run_pending();
        self.inner.borrow_mut().store = None;
        info!("event=store_dispose module=store status=ok drained={drained}");
    }

    fn redeliver(&self) {
        let waiting = std::mem::take(&mut self.inner.borrow_mut().undelivered);
        if waiting.is_empty() {
            return;
        }
        let still_waiting = waiting
            .into_iter()
            .filter_map(|delivery| delivery.try_deliver())
            .collect::<Vec<_>>();
        self.inner.borrow_mut().undelivered.extend(still_waiting);
    }

    fn enqueue<T>(
        &self,
        build: impl FnOnce(Weak<RefCell<RequestState<T>>>) -> StoreOp,
    ) -> Request<T> {
        let mut inner = self.inner.borrow_mut();
        if inner.store.is_none() {
            return Request::failed(StoreError::Disposed);
        }
        let request = Request::pending();
        inner.queue.push_back(build(request.downgrade()));
        request
    }
}

type Deferred = Option<Box<dyn Delivery>>;

fn execute(store: &mut dyn NoteStore, op: StoreOp) -> Deferred {
    match op {
        StoreOp::List { filter_hint, slot } => {
            complete(slot, "list", store.list_notes(&filter_hint))
        }
        StoreOp::Add { draft, slot } => complete(slot, "add", store.add_note(&draft)),
        StoreOp::Update { note, slot } => complete(slot, "update", store.update_note(&note)),
        StoreOp::Delete { note, slot } => complete(slot, "delete", store.delete_note(&note)),
        StoreOp::Get { id, slot } => complete(slot, "get", store.get_note(id)),
    }
}

fn reject(op: StoreOp) -> Deferred {
    match op {
        StoreOp::List { slot, .. } => complete(slot, "list", Err(StoreError::Disposed)),
        StoreOp::Add { slot, .. } => complete(slot, "add", Err(StoreError::Disposed)),
        StoreOp::Update { slot, .. } => complete(slot, "update", Err(StoreError::Disposed)),
        StoreOp::Delete { slot, .. } => complete(slot, "delete", Err(StoreError::Disposed)),
        StoreOp::Get { slot, .. } => complete(slot, "get", Err(StoreError::Disposed)),
    }
}

fn complete<T: 'static>(
    slot: Weak<RefCell<RequestState<T>>>,
    op: &'static str,
    result: StoreResult<T>,
) -> Deferred {
    match &result {
        Ok(_) => debug!("event=store_request module=store status=ok op={op}"),
        Err(err) => warn!("event=store_request module=store status=error op={op} error={err}"),
    }
    Box::new(Undelivered { slot, op, result }).try_deliver()
}

#[cfg(test)]
mod tests {
    use super::{RequestState, StoreClient};
    use crate::model::note::NoteDraft;
    use crate::store::memory::MemoryNoteStore;
    use crate::store::note_store::StoreError;

    #[test]
    fn requests_stay_pending_until_pumped() {
        let client = StoreClient::new(MemoryNoteStore::new());
        let added = client.add_note(NoteDraft::new("a", "b"));
        assert!(added.is_pending());
        assert_eq!(client.pending_count(), 1);

        assert_eq!(client.run_pending(), 1);
        let note = added.state().value().cloned().unwrap();
        assert_eq!(note.title, "a");
    }

    #[test]
    fn dropped_handle_still_runs_operation() {
        let client = StoreClient::new(MemoryNoteStore::new());
        drop(client.add_note(NoteDraft::new("a", "b")));
        let listed = client.list_notes("");
        client.run_pending();
        assert_eq!(listed.state().value().map(Vec::len), Some(1));
    }

    #[test]
    fn response_for_borrowed_state_is_delivered_on_next_pump() {
        let client = StoreClient::new(MemoryNoteStore::new());
        let added = client.add_note(NoteDraft::new("a", "b"));
        {
            let _guard = added.state();
            assert_eq!(client.run_pending(), 1);
        }
        assert!(added.is_pending());
        assert_eq!(client.pending_count(), 0);
        assert_eq!(client.undelivered_count(), 1);

        assert_eq!(client.run_pending(), 0);
        assert_eq!(client.undelivered_count(), 0);
        assert_eq!(added.state().value().map(|note| note.title.as_str()), Some("a"));
    }

    #[test]
    fn deferred_response_for_dropped_handle_is_discarded() {
        let client = StoreClient::new(MemoryNoteStore::new());
        let added = client.add_note(NoteDraft::new("a", "b"));
        {
            let _guard = added.state();
            client.run_pending();
        }
        drop(added);
        client.run_pending();
        assert_eq!(client.undelivered_count(), 0);
    }

    #[test]
    fn requests_after_dispose_fail_immediately() {
        let client = StoreClient::new(MemoryNoteStore::new());
        let queued = client.add_note(NoteDraft::new("a", "b"));
        client.dispose();
        assert!(matches!(queued.into_state(), RequestState::Succeeded(_)));

        let late = client.list_notes("");
        assert!(!late.is_pending());
        assert!(matches!(late.state().error(), Some(StoreError::Disposed)));
        assert_eq!(client.run_pending(), 0);
    }
}
