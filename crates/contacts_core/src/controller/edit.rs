//! Edit-contact screen controller.

use crate::controller::prompt::{Prompter, DELETE_CONFIRMATION, UPDATE_CONFIRMATION};
use crate::controller::{alert_repo_error, run_refresh, RefreshCallback, ScreenOutcome};
use crate::model::contact::{Contact, ContactDraft};
use crate::repo::contact_repo::{ContactRepository, RepoError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing,
}

/// Text lines of the read-only view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReadView {
    pub name_line: String,
    pub telephone_line: String,
}

/// Detail screen for one contact handed over by the list.
///
/// The contact is taken by value at navigation time and never re-fetched.
pub struct EditContactController<R: ContactRepository> {
    repo: R,
    contact: Contact,
    form: ContactDraft,
    mode: EditMode,
    on_refresh: Option<RefreshCallback>,
}

impl<R: ContactRepository> EditContactController<R> {
    pub fn new(repo: R, contact: Contact, on_refresh: Option<RefreshCallback>) -> Self {
        let form = contact.draft();
        Self {
            repo,
            contact,
            form,
            mode: EditMode::Viewing,
            on_refresh,
        }
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn enter_edit_mode(&mut self) {
        self.mode = EditMode::Editing;
    }

    pub fn form(&self) -> &ContactDraft {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactDraft {
        &mut self.form
    }

    /// Read view of the current form values.
    pub fn read_view(&self) -> ContactReadView {
        ContactReadView {
            name_line: format!("Name: {}", self.form.display_name()),
            telephone_line: format!("Telephone: {}", self.form.telephone),
        }
    }

    /// Confirms and writes the edited fields.
    pub fn save(&mut self, prompter: &mut impl Prompter) -> ScreenOutcome {
        if !self.repo.is_ready() {
            alert_repo_error(prompter, "update contact", &RepoError::NotReady);
            return ScreenOutcome::Stay;
        }
        if let Err(err) = self.form.validate() {
            alert_repo_error(prompter, "update contact", &RepoError::Validation(err));
            return ScreenOutcome::Stay;
        }
        if !prompter.confirm(&UPDATE_CONFIRMATION) {
            return ScreenOutcome::Stay;
        }

        match self.repo.update(self.contact.id, &self.form) {
            Ok(()) => {
                run_refresh(&mut self.on_refresh);
                ScreenOutcome::ReturnToList
            }
            Err(err) => {
                alert_repo_error(prompter, "update contact", &err);
                ScreenOutcome::Stay
            }
        }
    }

    /// Asks the destructive confirmation and removes the contact.
    pub fn delete(&mut self, prompter: &mut impl Prompter) -> ScreenOutcome {
        if !self.repo.is_ready() {
            alert_repo_error(prompter, "delete contact", &RepoError::NotReady);
            return ScreenOutcome::Stay;
        }
        if !prompter.confirm(&DELETE_CONFIRMATION) {
            return ScreenOutcome::Stay;
        }

        match self.repo.delete(self.contact.id) {
            Ok(()) => {
                run_refresh(&mut self.on_refresh);
                ScreenOutcome::ReturnToList
            }
            Err(err) => {
                alert_repo_error(prompter, "delete contact", &err);
                ScreenOutcome::Stay
            }
        }
    }
}
