//! Decides whether a freshly fetched entity has to be written.
//!
//! Only a fixed subset of fields is compared. Anything outside it (a tour's
//! image or info, a round's url or start time) may drift in storage without
//! triggering a write until one of the compared fields changes too.

use models::domains::{rounds, tournaments};
use models::schemas::broadcast::{BroadcastRound, BroadcastTour};

pub trait ChangeDetector<Stored> {
    /// `true` when nothing is stored yet or a compared field differs.
    fn needs_write(&self, stored: Option<&Stored>) -> bool;
}

impl ChangeDetector<tournaments::Model> for BroadcastTour {
    fn needs_write(&self, stored: Option<&tournaments::Model>) -> bool {
        let Some(stored) = stored else {
            return true;
        };

        stored.name != self.name
            || stored.slug != self.slug
            || stored.url != self.url
            || stored.tier != self.tier
    }
}

impl ChangeDetector<rounds::Model> for BroadcastRound {
    fn needs_write(&self, stored: Option<&rounds::Model>) -> bool {
        let Some(stored) = stored else {
            return true;
        };

        // Compared in whole milliseconds, and only when the upstream reports one.
        let finished_at_changed = match self.finished_at {
            Some(finished_at) => {
                stored.finished_at.map(|t| t.timestamp_millis())
                    != Some(finished_at.timestamp_millis())
            }
            None => false,
        };

        stored.name != self.name
            || stored.slug != self.slug
            || stored.finished != self.finished
            || finished_at_changed
    }
}
