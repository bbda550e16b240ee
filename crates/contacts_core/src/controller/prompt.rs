//! Blocking prompt primitive supplied by the UI shell.

/// Visual weight of the confirming button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmStyle {
    Default,
    Destructive,
}

/// A yes/no question shown before a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
    pub style: ConfirmStyle,
}

pub const ADD_CONFIRMATION: Confirmation = Confirmation {
    title: "Add Contact",
    message: "Do you want to add this contact?",
    confirm_label: "Add",
    style: ConfirmStyle::Default,
};

pub const UPDATE_CONFIRMATION: Confirmation = Confirmation {
    title: "Confirm Update",
    message: "Do you want to save the changes?",
    confirm_label: "Save",
    style: ConfirmStyle::Default,
};

pub const DELETE_CONFIRMATION: Confirmation = Confirmation {
    title: "Delete Contact",
    message: "Are you sure you want to delete this contact?",
    confirm_label: "Delete",
    style: ConfirmStyle::Destructive,
};

pub const NOT_READY_TITLE: &str = "Database not ready";
pub const NOT_READY_MESSAGE: &str = "Please try again in a moment.";
pub const MISSING_INFO_TITLE: &str = "Missing Info";
pub const MISSING_INFO_MESSAGE: &str = "Please fill in all required fields.";
pub const ERROR_TITLE: &str = "Error";

/// Blocking dialogs rendered by the UI shell.
///
/// `confirm` returns `true` when the user picked the confirming button and
/// `false` on cancel or dismissal.
pub trait Prompter {
    fn confirm(&mut self, confirmation: &Confirmation) -> bool;
    fn alert(&mut self, title: &str, message: &str);
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn confirm(&mut self, confirmation: &Confirmation) -> bool {
        (**self).confirm(confirmation)
    }

    fn alert(&mut self, title: &str, message: &str) {
        (**self).alert(title, message)
    }
}
