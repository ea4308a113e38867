//! Flutter-facing bindings for the PocketNote core.

pub mod api;
