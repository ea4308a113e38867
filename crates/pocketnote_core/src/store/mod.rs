//! Note store contract, bundled implementations and async client.
//!
//! # Responsibility
//! - Define the four-operation store contract consumed by the screens.
//! - Ship in-memory and SQLite stores so hosts can run without a backend.
//! - Expose store calls to the UI as queued requests with observable state.
//!
//! # Invariants
//! - The store assigns note identifiers; callers never invent them.
//! - Delete is idempotent from the caller's perspective.

pub mod client;
pub mod memory;
pub mod note_store;
pub mod sqlite;
