//! Contact record and editable draft.
//!
//! # Responsibility
//! - Define the persisted contact shape and the four user-editable fields.
//! - Validate required fields before any write reaches storage.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes afterwards.
//! - `first_name`, `last_name` and `telephone` are non-blank on create.
//! - `display_name()` never contains doubled or trailing spaces from an
//!   absent middle name.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned row id (`contacts.id`).
pub type ContactId = i64;

/// Persisted contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    /// Stored in `contacts.middleInitial`; empty when absent.
    pub middle_name_or_initial: String,
    pub last_name: String,
    pub telephone: String,
    pub favorite: bool,
}

impl Contact {
    /// Full name used for display, search and sorting.
    pub fn display_name(&self) -> String {
        display_name(
            &self.first_name,
            &self.middle_name_or_initial,
            &self.last_name,
        )
    }

    /// Editable copy of the four user-facing fields.
    pub fn draft(&self) -> ContactDraft {
        ContactDraft {
            first_name: self.first_name.clone(),
            middle_name_or_initial: self.middle_name_or_initial.clone(),
            last_name: self.last_name.clone(),
            telephone: self.telephone.clone(),
        }
    }
}

/// The four fields a user can type in the add/edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub first_name: String,
    pub middle_name_or_initial: String,
    pub last_name: String,
    pub telephone: String,
}

impl ContactDraft {
    pub fn new(
        first_name: impl Into<String>,
        middle_name_or_initial: impl Into<String>,
        last_name: impl Into<String>,
        telephone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            middle_name_or_initial: middle_name_or_initial.into(),
            last_name: last_name.into(),
            telephone: telephone.into(),
        }
    }

    /// Checks required fields in form order and reports the first blank one.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ContactValidationError::BlankFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(ContactValidationError::BlankLastName);
        }
        if self.telephone.trim().is_empty() {
            return Err(ContactValidationError::BlankTelephone);
        }
        Ok(())
    }

    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.middle_name_or_initial, &self.last_name)
    }
}

/// Required-field violations for contact writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    BlankFirstName,
    BlankLastName,
    BlankTelephone,
}

impl ContactValidationError {
    pub fn field(self) -> &'static str {
        match self {
            Self::BlankFirstName => "first_name",
            Self::BlankLastName => "last_name",
            Self::BlankTelephone => "telephone",
        }
    }
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} must not be blank", self.field())
    }
}

impl Error for ContactValidationError {}

/// Joins name parts with single spaces, skipping a blank middle token.
pub fn display_name(first_name: &str, middle_name_or_initial: &str, last_name: &str) -> String {
    let middle = middle_name_or_initial.trim();
    if middle.is_empty() {
        format!("{first_name} {last_name}")
    } else {
        format!("{first_name} {middle} {last_name}")
    }
}

#[cfg(test)]
mod tests {
    use super::{display_name, Contact, ContactDraft, ContactValidationError};

    #[test]
    fn display_name_skips_blank_middle() {
        assert_eq!(display_name("Amy", "", "Lee"), "Amy Lee");
        assert_eq!(display_name("Amy", "   ", "Lee"), "Amy Lee");
        assert_eq!(display_name("Amy", "J.", "Lee"), "Amy J. Lee");
    }

    #[test]
    fn validate_reports_first_blank_required_field() {
        let draft = ContactDraft::new("Amy", "", "Lee", "  ");
        assert_eq!(draft.validate(), Err(ContactValidationError::BlankTelephone));

        let draft = ContactDraft::new(" ", "", "", "");
        assert_eq!(draft.validate(), Err(ContactValidationError::BlankFirstName));

        assert!(ContactDraft::new("Amy", "", "Lee", "555-0100").validate().is_ok());
    }

    #[test]
    fn contact_serializes_with_camel_case_keys() {
        let contact = Contact {
            id: 7,
            first_name: "Amy".to_string(),
            middle_name_or_initial: String::new(),
            last_name: "Lee".to_string(),
            telephone: "555-0100".to_string(),
            favorite: true,
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["firstName"], "Amy");
        assert_eq!(json["middleNameOrInitial"], "");
        assert_eq!(json["favorite"], true);
    }
}
