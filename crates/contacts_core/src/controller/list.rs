//! Contact list screen controller.
//!
//! # Responsibility
//! - Hold search term, sort direction and the last fetched snapshot.
//! - Re-fetch on focus, or when a watched repository reports a change.
//! - Toggle favorites inline with transient per-row feedback.

use crate::controller::alert_repo_error;
use crate::controller::feedback::FavoriteFeedback;
use crate::controller::prompt::Prompter;
use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::{
    ContactRepository, RepoError, RepoResult, SqliteContactRepository, SubscriptionId,
};
use crate::view::contact_list::{present_contacts, SortDirection};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Live subscription created by `ContactListController::watch`.
#[must_use = "dropping the guard stops watching the repository"]
pub struct ListWatch<'a> {
    repo: &'a SqliteContactRepository,
    id: SubscriptionId,
}

impl ListWatch<'_> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for ListWatch<'_> {
    fn drop(&mut self) {
        self.repo.unsubscribe(self.id);
    }
}

pub struct ContactListController<R: ContactRepository> {
    repo: R,
    contacts: Vec<Contact>,
    search: String,
    direction: SortDirection,
    feedback: FavoriteFeedback,
    stale: Arc<AtomicBool>,
}

impl<R: ContactRepository> ContactListController<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            contacts: Vec::new(),
            search: String::new(),
            direction: SortDirection::Ascending,
            feedback: FavoriteFeedback::default(),
            stale: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Re-fetches the full snapshot when the screen regains focus.
    ///
    /// Before the store is ready the current snapshot is kept and no error
    /// is reported; the next focus retries.
    pub fn on_focus(&mut self) -> RepoResult<()> {
        match self.reload() {
            Err(RepoError::NotReady) => {
                debug!("event=contact_list_focus module=controller status=skipped reason=not_ready");
                Ok(())
            }
            other => other,
        }
    }

    /// Marks the snapshot stale whenever `repo` reports a mutation.
    ///
    /// The listener stays registered until the returned guard is dropped.
    pub fn watch<'a>(&self, repo: &'a SqliteContactRepository) -> ListWatch<'a> {
        let stale = Arc::clone(&self.stale);
        let id = repo.subscribe(move |_| stale.store(true, Ordering::Release));
        ListWatch { repo, id }
    }

    /// Reloads only if a watched repository changed since the last load.
    pub fn refresh_if_stale(&mut self) -> RepoResult<bool> {
        if !self.stale.load(Ordering::Acquire) {
            return Ok(false);
        }
        self.reload()?;
        Ok(true)
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn toggle_sort(&mut self) {
        self.direction = self.direction.toggle();
    }

    /// Rows to render for the current search and sort state.
    pub fn visible(&self) -> Vec<Contact> {
        present_contacts(&self.contacts, &self.search, self.direction)
    }

    /// Flips the favorite flag of a listed contact.
    ///
    /// Ids absent from the current snapshot are ignored.
    pub fn toggle_favorite(
        &mut self,
        id: ContactId,
        now: Instant,
        prompter: &mut impl Prompter,
    ) -> RepoResult<()> {
        let Some(current) = self.contacts.iter().find(|contact| contact.id == id) else {
            return Ok(());
        };
        let favorite = !current.favorite;

        if let Err(err) = self.repo.toggle_favorite(id, favorite) {
            alert_repo_error(prompter, "update favorite", &err);
            return Err(err);
        }

        self.feedback.record(id, favorite, now);
        self.reload()
    }

    /// Feedback text to show next to the row of `id`, if still live.
    pub fn feedback_for(&self, id: ContactId, now: Instant) -> Option<&'static str> {
        self.feedback.message_for(id, now)
    }

    /// Drops expired feedback; returns whether anything changed.
    pub fn expire_feedback(&mut self, now: Instant) -> bool {
        self.feedback.prune(now) > 0
    }

    fn reload(&mut self) -> RepoResult<()> {
        self.contacts = self.repo.list()?;
        self.stale.store(false, Ordering::Release);
        Ok(())
    }
}
