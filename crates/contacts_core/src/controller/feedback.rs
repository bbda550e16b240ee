//! Transient per-contact favorite feedback.
//!
//! # Invariants
//! - At most one message per contact id; a newer toggle replaces the older
//!   message and restarts its expiry.
//! - Expired entries are never reported, even before `prune` runs.

use crate::model::contact::ContactId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a favorite confirmation stays next to its row.
pub const FAVORITE_FEEDBACK_TTL: Duration = Duration::from_secs(2);
pub const MARKED_FAVORITE_MESSAGE: &str = "Marked as Favorite";
pub const REMOVED_FAVORITE_MESSAGE: &str = "Removed from Favorites";

#[derive(Debug, Clone, Copy)]
struct FeedbackEntry {
    message: &'static str,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct FavoriteFeedback {
    ttl: Duration,
    entries: HashMap<ContactId, FeedbackEntry>,
}

impl Default for FavoriteFeedback {
    fn default() -> Self {
        Self::with_ttl(FAVORITE_FEEDBACK_TTL)
    }
}

impl FavoriteFeedback {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Records the message for a toggle to `favorite` made at `now`.
    pub fn record(&mut self, id: ContactId, favorite: bool, now: Instant) {
        let message = if favorite {
            MARKED_FAVORITE_MESSAGE
        } else {
            REMOVED_FAVORITE_MESSAGE
        };
        self.entries.insert(
            id,
            FeedbackEntry {
                message,
                expires_at: now + self.ttl,
            },
        );
    }

    pub fn message_for(&self, id: ContactId, now: Instant) -> Option<&'static str> {
        self.entries
            .get(&id)
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.message)
    }

    /// Drops expired entries and returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.expires_at);
        before - self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_expires_after_ttl() {
        let start = Instant::now();
        let mut feedback = FavoriteFeedback::default();
        feedback.record(1, true, start);

        assert_eq!(
            feedback.message_for(1, start + Duration::from_millis(1999)),
            Some(MARKED_FAVORITE_MESSAGE)
        );
        assert_eq!(feedback.message_for(1, start + FAVORITE_FEEDBACK_TTL), None);
        assert_eq!(feedback.prune(start + FAVORITE_FEEDBACK_TTL), 1);
        assert!(feedback.is_empty());
    }

    #[test]
    fn newer_toggle_replaces_message_and_restarts_expiry() {
        let start = Instant::now();
        let mut feedback = FavoriteFeedback::default();
        feedback.record(1, true, start);
        feedback.record(1, false, start + Duration::from_millis(1500));

        let later = start + Duration::from_millis(2500);
        assert_eq!(feedback.message_for(1, later), Some(REMOVED_FAVORITE_MESSAGE));
        assert_eq!(feedback.prune(later), 0);
    }

    #[test]
    fn entries_are_tracked_per_contact() {
        let start = Instant::now();
        let mut feedback = FavoriteFeedback::default();
        feedback.record(1, true, start);
        feedback.record(2, false, start + Duration::from_secs(1));

        let later = start + Duration::from_millis(2500);
        assert_eq!(feedback.message_for(1, later), None);
        assert_eq!(feedback.message_for(2, later), Some(REMOVED_FAVORITE_MESSAGE));
        assert_eq!(feedback.prune(later), 1);
    }
}
