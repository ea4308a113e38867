//! Client-side note search.
//!
//! # Responsibility
//! - Narrow an already-loaded note collection by a free-text query.
//! - Stay pure: no store access, no mutation of input.

pub mod filter;
