//! Note domain model.
//!
//! # Responsibility
//! - Define the note record shared by store, list and editor.
//! - Own draft validation rules used before store writes.
//!
//! # Invariants
//! - Every persisted note is identified by a store-assigned `NoteId`.
//! - Drafts never carry an identifier.

pub mod note;
