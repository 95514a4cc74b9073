use serde::{Deserialize, Serialize};

/// Identifier wrapper for user profiles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the event an RSVP belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Activity counters stored on a profile. Missing fields deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileCounters {
    pub xp_points: u64,
    pub events_created: u32,
    pub messages_count: u32,
    pub rsvps_count: u32,
    pub ratings_count: u32,
}

/// Aggregated behaviour used to place a user on the commitment/social/critic axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAnalytics {
    pub rsvp_going_count: u32,
    pub rsvp_maybe_count: u32,
    /// "Going" RSVPs the user did not show up for. See [`super::analytics::summarize`].
    pub flake_count: u32,
    pub chat_messages_count: u32,
    pub ratings_given_count: u32,
}

/// Everything the persistence layer knows about a profile that the engine consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub profile_id: ProfileId,
    pub display_name: String,
    pub counters: ProfileCounters,
    #[serde(default)]
    pub analytics: Option<UserAnalytics>,
}

impl ProfileSnapshot {
    pub fn new(profile_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            profile_id: ProfileId(profile_id.into()),
            display_name: display_name.into(),
            counters: ProfileCounters::default(),
            analytics: None,
        }
    }
}
