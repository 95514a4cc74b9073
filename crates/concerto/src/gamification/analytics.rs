use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::counters::UserAnalytics;
use super::xp::RsvpStatus;

/// One user's RSVP to one event, as recorded by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRecord {
    pub status: RsvpStatus,
    pub event_ends_at: DateTime<Utc>,
    #[serde(default)]
    pub attendance_confirmed: bool,
    #[serde(default)]
    pub rated: bool,
    /// Chat messages the user posted in the event thread.
    #[serde(default)]
    pub messages: u32,
}

impl RsvpRecord {
    /// A "going" RSVP for a finished event with neither a check-in nor a rating.
    pub fn is_flake(&self, as_of: DateTime<Utc>) -> bool {
        self.status == RsvpStatus::Going
            && self.event_ends_at < as_of
            && !self.attendance_confirmed
            && !self.rated
    }
}

/// Aggregates RSVP history into the analytics record the coordinate calculator reads.
pub fn summarize(history: &[RsvpRecord], as_of: DateTime<Utc>) -> UserAnalytics {
    history
        .iter()
        .fold(UserAnalytics::default(), |analytics, record| tally(analytics, record, as_of))
}

fn tally(
    mut analytics: UserAnalytics,
    record: &RsvpRecord,
    as_of: DateTime<Utc>,
) -> UserAnalytics {
    match record.status {
        RsvpStatus::Going => {
            analytics.rsvp_going_count = analytics.rsvp_going_count.saturating_add(1)
        }
        RsvpStatus::Interested => {
            analytics.rsvp_maybe_count = analytics.rsvp_maybe_count.saturating_add(1)
        }
    }
    if record.is_flake(as_of) {
        analytics.flake_count = analytics.flake_count.saturating_add(1);
    }
    if record.rated {
        analytics.ratings_given_count = analytics.ratings_given_count.saturating_add(1);
    }
    analytics.chat_messages_count = analytics.chat_messages_count.saturating_add(record.messages);
    analytics
}
