//! Contact list filtering and ordering.
//!
//! # Invariants
//! - Favorites always precede non-favorites, in either sort direction.
//! - Equal display names keep their snapshot order (stable sort).
//! - Output depends only on the arguments.
//! - Names are ordered with the root-locale collation, so accented letters
//!   sort next to their base letter and lowercase precedes uppercase.

use crate::model::contact::Contact;
use icu_collator::{Collator, CollatorOptions, Strength};
use log::warn;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Name ordering applied after the favorites-first grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Self::Ascending
    }
}

/// Filters `contacts` by `search_term` and orders them for display.
pub fn present_contacts(
    contacts: &[Contact],
    search_term: &str,
    direction: SortDirection,
) -> Vec<Contact> {
    let needle = search_term.trim().to_lowercase();
    let mut rows: Vec<(String, &Contact)> = contacts
        .iter()
        .map(|contact| (contact.display_name(), contact))
        .filter(|(name, _)| needle.is_empty() || name.to_lowercase().contains(&needle))
        .collect();

    let collator = NameCollator::root();
    rows.sort_by(|(left_name, left), (right_name, right)| {
        right.favorite.cmp(&left.favorite).then_with(|| {
            let by_name = collator.compare(left_name, right_name);
            match direction {
                SortDirection::Ascending => by_name,
                SortDirection::Descending => by_name.reverse(),
            }
        })
    });

    rows.into_iter().map(|(_, contact)| contact.clone()).collect()
}

/// Display-name comparison used for list ordering.
pub struct NameCollator {
    collator: Option<Collator>,
}

impl NameCollator {
    /// Root-locale collator at tertiary strength.
    pub fn root() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(err) => {
                warn!("event=collator_init module=view status=error error={err:?}");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(left, right),
            // Without collation data, fall back to a case-insensitive order.
            None => left
                .to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| right.cmp(left)),
        }
    }
}
