//! Add-contact screen controller.

use crate::controller::prompt::{
    Prompter, ADD_CONFIRMATION, MISSING_INFO_MESSAGE, MISSING_INFO_TITLE, NOT_READY_MESSAGE,
    NOT_READY_TITLE,
};
use crate::controller::{alert_repo_error, run_refresh, RefreshCallback, ScreenOutcome};
use crate::model::contact::{ContactDraft, ContactId};
use crate::repo::contact_repo::ContactRepository;

/// Form state and submit flow of the add screen.
pub struct AddContactController<R: ContactRepository> {
    repo: R,
    form: ContactDraft,
    on_refresh: Option<RefreshCallback>,
    created: Option<ContactId>,
}

impl<R: ContactRepository> AddContactController<R> {
    /// Opens the screen with an empty form.
    pub fn new(repo: R, on_refresh: Option<RefreshCallback>) -> Self {
        Self {
            repo,
            form: ContactDraft::default(),
            on_refresh,
            created: None,
        }
    }

    pub fn form(&self) -> &ContactDraft {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactDraft {
        &mut self.form
    }

    /// Id of the contact inserted by the last successful submit.
    pub fn created_id(&self) -> Option<ContactId> {
        self.created
    }

    /// Validates, asks for confirmation and inserts the contact.
    ///
    /// The form is kept intact on every path that returns `Stay`.
    pub fn submit(&mut self, prompter: &mut impl Prompter) -> ScreenOutcome {
        if !self.repo.is_ready() {
            prompter.alert(NOT_READY_TITLE, NOT_READY_MESSAGE);
            return ScreenOutcome::Stay;
        }
        if self.form.validate().is_err() {
            prompter.alert(MISSING_INFO_TITLE, MISSING_INFO_MESSAGE);
            return ScreenOutcome::Stay;
        }
        if !prompter.confirm(&ADD_CONFIRMATION) {
            return ScreenOutcome::Stay;
        }

        match self.repo.create(&self.form) {
            Ok(id) => {
                self.created = Some(id);
                run_refresh(&mut self.on_refresh);
                ScreenOutcome::ReturnToList
            }
            Err(err) => {
                alert_repo_error(prompter, "add contact", &err);
                ScreenOutcome::Stay
            }
        }
    }
}
