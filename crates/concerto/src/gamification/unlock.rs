use serde::{Deserialize, Serialize};

use super::counters::ProfileCounters;

/// Features hidden until a profile passes a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatedFeature {
    /// Measured in XP.
    Leaderboard,
    /// Measured in ratings submitted.
    Vault,
}

impl GatedFeature {
    pub fn current_value(self, counters: &ProfileCounters) -> u64 {
        match self {
            GatedFeature::Leaderboard => counters.xp_points,
            GatedFeature::Vault => u64::from(counters.ratings_count),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnlockStatus {
    pub is_unlocked: bool,
    /// 0.0..=100.0
    pub progress_percent: f64,
    pub remaining: u64,
}

pub fn is_unlocked(current_value: u64, threshold: u64) -> bool {
    current_value >= threshold
}

/// Progress towards `threshold`, capped at 100. A zero threshold is always fully unlocked.
pub fn unlock_status(current_value: u64, threshold: u64) -> UnlockStatus {
    let progress_percent = if threshold == 0 {
        100.0
    } else {
        (current_value as f64 * 100.0 / threshold as f64).min(100.0)
    };

    UnlockStatus {
        is_unlocked: is_unlocked(current_value, threshold),
        progress_percent,
        remaining: threshold.saturating_sub(current_value),
    }
}
