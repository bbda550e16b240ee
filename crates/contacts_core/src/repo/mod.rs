//! Repository layer for contact persistence.
//!
//! # Responsibility
//! - Define the storage contract consumed by screen controllers.
//! - Isolate SQLite statements from controller orchestration.
//!
//! # Invariants
//! - Every statement is parameterized; no user text is spliced into SQL.
//! - Writes validate required fields before touching storage.

pub mod contact_repo;
