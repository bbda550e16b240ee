//! Core logic for the contact manager.
//! The UI shell renders screens; this crate owns storage, list ordering and
//! the add/edit/list screen flows.

pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod view;

pub use controller::add::AddContactController;
pub use controller::edit::{ContactReadView, EditContactController, EditMode};
pub use controller::feedback::{FavoriteFeedback, FAVORITE_FEEDBACK_TTL};
pub use controller::list::{ContactListController, ListWatch};
pub use controller::prompt::{ConfirmStyle, Confirmation, Prompter};
pub use controller::{RefreshCallback, ScreenOutcome};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{display_name, Contact, ContactDraft, ContactId, ContactValidationError};
pub use repo::contact_repo::{
    ContactEvent, ContactRepository, RepoError, RepoResult, SqliteContactRepository,
    StoreLocation, SubscriptionId,
};
pub use view::contact_list::{present_contacts, NameCollator, SortDirection};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
