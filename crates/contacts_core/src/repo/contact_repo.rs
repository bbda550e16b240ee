//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/create/update/favorite/delete over the `contacts` table.
//! - Own the single store handle, opened lazily by `initialize()`.
//! - Notify subscribers after each successful mutation.
//!
//! # Invariants
//! - Every operation fails with `RepoError::NotReady` before `initialize()`.
//! - `create`/`update` validate the draft before any SQL is issued.
//! - `update`/`delete`/`toggle_favorite` on an unknown id succeed without
//!   changing anything and without emitting an event.
//! - Only a stored favorite of exactly 1 reads as a favorite; any other value
//!   reads as non-favorite so one odd row never hides the rest of the list.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use log::{debug, error, info, warn};
use once_cell::unsync::OnceCell;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    firstName,
    middleInitial,
    lastName,
    telephone,
    favorite
FROM contacts
ORDER BY id ASC;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error taxonomy surfaced to controllers.
#[derive(Debug)]
pub enum RepoError {
    /// Store handle not opened yet; the user should retry.
    NotReady,
    /// Required field blank; nothing was written.
    Validation(ContactValidationError),
    /// Underlying SQLite failure; message is shown to the user verbatim.
    Storage(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => write!(f, "contacts database is not ready"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotReady => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

/// Mutation notifications delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    Created(ContactId),
    Updated(ContactId),
    FavoriteChanged { id: ContactId, favorite: bool },
    Deleted(ContactId),
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&ContactEvent) + Send + Sync>;

/// Storage contract used by screen controllers.
pub trait ContactRepository {
    /// Whether the store handle has been opened.
    fn is_ready(&self) -> bool;
    /// All contacts ordered by id.
    fn list(&self) -> RepoResult<Vec<Contact>>;
    /// Inserts a new non-favorite contact and returns its id.
    fn create(&self, draft: &ContactDraft) -> RepoResult<ContactId>;
    /// Overwrites the four editable fields of `id`.
    fn update(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()>;
    /// Sets the favorite flag of `id`, leaving every other column untouched.
    fn toggle_favorite(&self, id: ContactId, favorite: bool) -> RepoResult<()>;
    /// Removes `id`.
    fn delete(&self, id: ContactId) -> RepoResult<()>;
}

impl<R: ContactRepository + ?Sized> ContactRepository for &R {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn list(&self) -> RepoResult<Vec<Contact>> {
        (**self).list()
    }

    fn create(&self, draft: &ContactDraft) -> RepoResult<ContactId> {
        (**self).create(draft)
    }

    fn update(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()> {
        (**self).update(id, draft)
    }

    fn toggle_favorite(&self, id: ContactId, favorite: bool) -> RepoResult<()> {
        (**self).toggle_favorite(id, favorite)
    }

    fn delete(&self, id: ContactId) -> RepoResult<()> {
        (**self).delete(id)
    }
}

/// Where the SQLite store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

/// SQLite-backed contact repository.
///
/// Constructed once at startup and borrowed by every controller; the
/// connection is opened on the first `initialize()` and reused afterwards.
pub struct SqliteContactRepository {
    location: StoreLocation,
    conn: OnceCell<Connection>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_subscription: Cell<u64>,
}

impl SqliteContactRepository {
    /// Creates an unopened repository for `location`.
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            conn: OnceCell::new(),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    /// Shorthand for a file-backed repository.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreLocation::File(path.into()))
    }

    /// Wraps an already migrated connection; the repository is ready at once.
    pub fn from_connection(conn: Connection) -> Self {
        let repo = Self::new(StoreLocation::Memory);
        let _ = repo.conn.set(conn);
        repo
    }

    /// Opens the store and ensures the `contacts` table exists.
    ///
    /// Idempotent: later calls reuse the handle opened by the first success.
    /// A failed open leaves the repository not ready so the caller may retry.
    pub fn initialize(&self) -> RepoResult<()> {
        self.conn.get_or_try_init(|| match &self.location {
            StoreLocation::File(path) => open_db(path),
            StoreLocation::Memory => open_db_in_memory(),
        })?;
        Ok(())
    }

    /// Registers a mutation listener.
    pub fn subscribe(
        &self,
        listener: impl Fn(&ContactEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        let listener: Listener = Arc::new(listener);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Removes a listener; returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    fn conn(&self) -> RepoResult<&Connection> {
        self.conn.get().ok_or(RepoError::NotReady)
    }

    fn emit(&self, event: ContactEvent) {
        // Snapshot first so a listener may subscribe/unsubscribe re-entrantly.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }
}

impl ContactRepository for SqliteContactRepository {
    fn is_ready(&self) -> bool {
        self.conn.get().is_some()
    }

    fn list(&self) -> RepoResult<Vec<Contact>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(CONTACT_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        debug!(
            "event=contact_list module=repo status=ok count={}",
            contacts.len()
        );
        Ok(contacts)
    }

    fn create(&self, draft: &ContactDraft) -> RepoResult<ContactId> {
        let conn = self.conn()?;
        draft.validate()?;

        let result = conn.execute(
            "INSERT INTO contacts (
                firstName,
                middleInitial,
                lastName,
                telephone,
                favorite
            ) VALUES (?1, ?2, ?3, ?4, 0);",
            params![
                draft.first_name.as_str(),
                draft.middle_name_or_initial.as_str(),
                draft.last_name.as_str(),
                draft.telephone.as_str(),
            ],
        );
        if let Err(err) = result {
            error!("event=contact_create module=repo status=error error={err}");
            return Err(err.into());
        }

        let id = conn.last_insert_rowid();
        info!("event=contact_create module=repo status=ok id={id}");
        self.emit(ContactEvent::Created(id));
        Ok(id)
    }

    fn update(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()> {
        let conn = self.conn()?;
        draft.validate()?;

        let changed = conn.execute(
            "UPDATE contacts
             SET
                firstName = ?1,
                middleInitial = ?2,
                lastName = ?3,
                telephone = ?4
             WHERE id = ?5;",
            params![
                draft.first_name.as_str(),
                draft.middle_name_or_initial.as_str(),
                draft.last_name.as_str(),
                draft.telephone.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            warn!("event=contact_update module=repo status=noop id={id}");
            return Ok(());
        }

        info!("event=contact_update module=repo status=ok id={id}");
        self.emit(ContactEvent::Updated(id));
        Ok(())
    }

    fn toggle_favorite(&self, id: ContactId, favorite: bool) -> RepoResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE contacts SET favorite = ?1 WHERE id = ?2;",
            params![bool_to_int(favorite), id],
        )?;

        if changed == 0 {
            warn!("event=contact_favorite module=repo status=noop id={id}");
            return Ok(());
        }

        info!("event=contact_favorite module=repo status=ok id={id} favorite={favorite}");
        self.emit(ContactEvent::FavoriteChanged { id, favorite });
        Ok(())
    }

    fn delete(&self, id: ContactId) -> RepoResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            warn!("event=contact_delete module=repo status=noop id={id}");
            return Ok(());
        }

        info!("event=contact_delete module=repo status=ok id={id}");
        self.emit(ContactEvent::Deleted(id));
        Ok(())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id: ContactId = row.get("id")?;
    let favorite = match row.get::<_, Value>("favorite")? {
        Value::Integer(1) => true,
        Value::Null | Value::Integer(0) => false,
        other => {
            warn!(
                "event=contact_row_parse module=repo status=coerced id={id} favorite_type={:?}",
                other.data_type()
            );
            false
        }
    };

    Ok(Contact {
        id,
        first_name: text_column(row, "firstName")?,
        middle_name_or_initial: text_column(row, "middleInitial")?,
        last_name: text_column(row, "lastName")?,
        telephone: text_column(row, "telephone")?,
        favorite,
    })
}

// Legacy rows may carry NULL text columns.
fn text_column(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
