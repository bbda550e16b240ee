//! Contact domain model.
//!
//! # Responsibility
//! - Define the contact record shared by repository, list view and controllers.
//! - Keep the derived display name a pure projection of stored fields.

pub mod contact;
