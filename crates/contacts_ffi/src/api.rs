//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose contact use-cases to Dart via FRB.
//! - Own the one repository instance of the app process.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call before `contacts_init` reports `error_kind = "not_ready"`.
//! - Error messages are UTF-8 and safe to show in an alert verbatim.

use contacts_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, present_contacts, Contact, ContactDraft, ContactId, ContactRepository,
    RepoError, SortDirection, SqliteContactRepository,
};
use log::{error, info};
use std::path::PathBuf;
use std::sync::Mutex;

const CONTACTS_DB_FILE_NAME: &str = "Contacts.db";
const CONTACTS_DB_PATH_ENV: &str = "CONTACTS_DB_PATH";

static STORE: Mutex<Option<OpenStore>> = Mutex::new(None);

struct OpenStore {
    path: PathBuf,
    repo: SqliteContactRepository,
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    pub id: i64,
    pub first_name: String,
    pub middle_name_or_initial: String,
    pub last_name: String,
    pub telephone: String,
    pub favorite: bool,
    pub display_name: String,
}

/// Filtered and sorted list for the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListResponse {
    pub ok: bool,
    pub items: Vec<ContactItem>,
    pub error_kind: Option<String>,
    pub message: String,
}

/// Result envelope for every contact write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactActionResponse {
    pub ok: bool,
    /// Id of the created contact; `None` for other writes and failures.
    pub contact_id: Option<i64>,
    /// `not_ready|validation|storage` on failure.
    pub error_kind: Option<String>,
    pub message: String,
}

impl ContactActionResponse {
    fn success(message: impl Into<String>, contact_id: Option<ContactId>) -> Self {
        Self {
            ok: true,
            contact_id,
            error_kind: None,
            message: message.into(),
        }
    }

    fn failure(err: &RepoError) -> Self {
        Self {
            ok: false,
            contact_id: None,
            error_kind: Some(error_kind(err).to_string()),
            message: err.to_string(),
        }
    }
}

/// Opens the contacts database and creates the table when missing.
///
/// `db_path` falls back to `$CONTACTS_DB_PATH`, then `<temp>/Contacts.db`.
/// Calling again after a success is a no-op, whatever path is passed.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_init(db_path: Option<String>) -> ContactActionResponse {
    let mut guard = match STORE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(store) = guard.as_ref() {
        return ContactActionResponse::success(
            format!("Already initialized at {}.", store.path.display()),
            None,
        );
    }

    let path = resolve_db_path(db_path);
    let repo = SqliteContactRepository::at_path(&path);
    match repo.initialize() {
        Ok(()) => {
            info!("event=ffi_contacts_init module=ffi status=ok");
            *guard = Some(OpenStore { path, repo });
            ContactActionResponse::success("Contacts ready.", None)
        }
        Err(err) => {
            error!("event=ffi_contacts_init module=ffi status=error error={err}");
            ContactActionResponse::failure(&err)
        }
    }
}

/// Lists contacts matching `search`, favorites first, then by name.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_list(search: String, ascending: bool) -> ContactListResponse {
    match with_repo(|repo| repo.list()) {
        Ok(contacts) => {
            let items = present_contacts(
                &contacts,
                search.as_str(),
                SortDirection::from_ascending(ascending),
            )
            .into_iter()
            .map(to_contact_item)
            .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No contacts.".to_string()
            } else {
                format!("{} contact(s).", items.len())
            };
            ContactListResponse {
                ok: true,
                items,
                error_kind: None,
                message,
            }
        }
        Err(err) => ContactListResponse {
            ok: false,
            items: Vec::new(),
            error_kind: Some(error_kind(&err).to_string()),
            message: err.to_string(),
        },
    }
}

/// Inserts a new non-favorite contact.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_create(
    first_name: String,
    middle_name_or_initial: String,
    last_name: String,
    telephone: String,
) -> ContactActionResponse {
    let draft = ContactDraft::new(first_name, middle_name_or_initial, last_name, telephone);
    match with_repo(|repo| repo.create(&draft)) {
        Ok(id) => ContactActionResponse::success("Contact added.", Some(id)),
        Err(err) => ContactActionResponse::failure(&err),
    }
}

/// Overwrites the four editable fields of `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_update(
    id: i64,
    first_name: String,
    middle_name_or_initial: String,
    last_name: String,
    telephone: String,
) -> ContactActionResponse {
    let draft = ContactDraft::new(first_name, middle_name_or_initial, last_name, telephone);
    match with_repo(|repo| repo.update(id, &draft)) {
        Ok(()) => ContactActionResponse::success("Contact updated.", None),
        Err(err) => ContactActionResponse::failure(&err),
    }
}

/// Sets the favorite flag of `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_toggle_favorite(id: i64, favorite: bool) -> ContactActionResponse {
    match with_repo(|repo| repo.toggle_favorite(id, favorite)) {
        Ok(()) if favorite => ContactActionResponse::success("Marked as Favorite", None),
        Ok(()) => ContactActionResponse::success("Removed from Favorites", None),
        Err(err) => ContactActionResponse::failure(&err),
    }
}

/// Deletes `id`; unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_delete(id: i64) -> ContactActionResponse {
    match with_repo(|repo| repo.delete(id)) {
        Ok(()) => ContactActionResponse::success("Contact deleted.", None),
        Err(err) => ContactActionResponse::failure(&err),
    }
}

fn with_repo<T>(
    f: impl FnOnce(&SqliteContactRepository) -> Result<T, RepoError>,
) -> Result<T, RepoError> {
    let guard = match STORE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let store = guard.as_ref().ok_or(RepoError::NotReady)?;
    f(&store.repo)
}

fn resolve_db_path(db_path: Option<String>) -> PathBuf {
    let explicit = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty());
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }
    if let Ok(raw) = std::env::var(CONTACTS_DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(CONTACTS_DB_FILE_NAME)
}

fn error_kind(err: &RepoError) -> &'static str {
    match err {
        RepoError::NotReady => "not_ready",
        RepoError::Validation(_) => "validation",
        RepoError::Storage(_) => "storage",
    }
}

fn to_contact_item(contact: Contact) -> ContactItem {
    let display_name = contact.display_name();
    ContactItem {
        id: contact.id,
        first_name: contact.first_name,
        middle_name_or_initial: contact.middle_name_or_initial,
        last_name: contact.last_name,
        telephone: contact.telephone,
        favorite: contact.favorite,
        display_name,
    }
}
