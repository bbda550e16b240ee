//! Flutter-facing bindings for the contact manager core.

pub mod api;
