//! Screen-level state for the note list and the note editor.
//!
//! # Responsibility
//! - Hold per-screen state independent of any rendering toolkit.
//! - Translate user intents into store requests.
//!
//! # Invariants
//! - Screens only talk to the store through `StoreClient`.

pub mod editor;
pub mod note_list;
