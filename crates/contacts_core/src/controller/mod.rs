//! Headless screen controllers for the add, edit and list screens.
//!
//! # Responsibility
//! - Orchestrate form input, confirmation prompts and repository calls.
//! - Report the navigation outcome back to the UI shell.
//!
//! # Invariants
//! - Errors end in a blocking alert through `Prompter`; they never escape as
//!   panics and never discard form input.
//! - A refresh callback runs only after a successful write.

pub mod add;
pub mod edit;
pub mod feedback;
pub mod list;
pub mod prompt;

use crate::repo::contact_repo::RepoError;
use log::warn;
use prompt::{
    Prompter, ERROR_TITLE, MISSING_INFO_MESSAGE, MISSING_INFO_TITLE, NOT_READY_MESSAGE,
    NOT_READY_TITLE,
};

/// Caller-supplied hook run after a successful write.
pub type RefreshCallback = Box<dyn FnMut()>;

/// Where the shell should navigate after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenOutcome {
    /// Remain on the current screen with its state intact.
    Stay,
    /// Pop back to the contact list.
    ReturnToList,
}

pub(crate) fn run_refresh(on_refresh: &mut Option<RefreshCallback>) {
    if let Some(callback) = on_refresh.as_mut() {
        callback();
    }
}

/// Turns a failed repository call into the matching blocking alert.
pub(crate) fn alert_repo_error(prompter: &mut impl Prompter, action: &str, err: &RepoError) {
    warn!("event=screen_action module=controller status=error action={action} error={err}");
    match err {
        RepoError::NotReady => prompter.alert(NOT_READY_TITLE, NOT_READY_MESSAGE),
        RepoError::Validation(_) => prompter.alert(MISSING_INFO_TITLE, MISSING_INFO_MESSAGE),
        other => prompter.alert(ERROR_TITLE, &format!("Failed to {action}: {other}")),
    }
}
