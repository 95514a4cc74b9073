use serde::{Deserialize, Serialize};

use super::counters::UserAnalytics;

/// Position on the three behavioural axes, each scored 0..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeCoordinates {
    pub commitment: u8,
    pub social: u8,
    pub critic: u8,
}

impl TypeCoordinates {
    pub const MAX_AXIS: u8 = 4;

    /// Canonical lookup key, e.g. `"4-2-0"`.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.commitment, self.social, self.critic)
    }
}

/// Scores each axis independently. Absent analytics score as an all-zero record.
pub fn calculate_coordinates(analytics: Option<&UserAnalytics>) -> TypeCoordinates {
    let analytics = analytics.copied().unwrap_or_default();

    TypeCoordinates {
        commitment: commitment_score(&analytics),
        social: social_score(analytics.chat_messages_count),
        critic: critic_score(&analytics),
    }
}

// Ratios are compared by cross-multiplying in u64 so boundaries like 9/10 are exact.

fn commitment_score(analytics: &UserAnalytics) -> u8 {
    let going = u64::from(analytics.rsvp_going_count);
    let total = going + u64::from(analytics.rsvp_maybe_count);

    match analytics.flake_count {
        flakes if flakes >= 3 => return 0,
        2 => return 1,
        _ => {}
    }

    if total == 0 {
        return 2;
    }

    if going * 10 >= total * 9 && going >= 3 {
        4
    } else if going * 10 >= total * 7 {
        3
    } else if going * 10 >= total * 4 {
        2
    } else if going * 10 >= total * 2 {
        1
    } else {
        0
    }
}

fn social_score(chat_messages: u32) -> u8 {
    match chat_messages {
        101.. => 4,
        51..=100 => 3,
        11..=50 => 2,
        1..=10 => 1,
        0 => 0,
    }
}

fn critic_score(analytics: &UserAnalytics) -> u8 {
    let going = u64::from(analytics.rsvp_going_count);
    let ratings = u64::from(analytics.ratings_given_count);

    if going == 0 {
        return 2;
    }

    if ratings > 10 || ratings * 10 > going * 8 {
        4
    } else if ratings * 10 > going * 5 {
        3
    } else if ratings * 10 > going * 2 {
        2
    } else if ratings > 0 {
        1
    } else {
        0
    }
}
