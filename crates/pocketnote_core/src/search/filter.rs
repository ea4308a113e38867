//! Case-insensitive substring filter over titles and contents.
//!
//! # Invariants
//! - Empty query returns every note.
//! - Output preserves input order.
//! - Query text is matched as-is (no trimming, no tokenizing).

use crate::model::note::Note;

/// Returns notes whose title or content contains `query`, ignoring case.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    if query.is_empty() {
        return notes.iter().collect();
    }

    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| note_matches(note, &needle))
        .collect()
}

/// Checks one note against an already lowercased needle.
fn note_matches(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle) || note.content.to_lowercase().contains(needle)
}
