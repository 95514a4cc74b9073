use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GamificationConfig;

use super::archetype::{get_archetype, ArchetypeDefinition};
use super::coordinates::{calculate_coordinates, TypeCoordinates};
use super::counters::{ProfileCounters, ProfileId, ProfileSnapshot, UserAnalytics};
use super::rank::{evaluate_rank, Rank};
use super::repository::{ProfileRepository, RepositoryError};
use super::unlock::{unlock_status, GatedFeature, UnlockStatus};
use super::xp::{award_for, rsvp_award, Activity, XpAward};

/// Composes the pure engine with the profile store.
pub struct ProfileService<R> {
    repository: Arc<R>,
    config: GamificationConfig,
}

impl<R> ProfileService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: GamificationConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &GamificationConfig {
        &self.config
    }

    /// Awards XP for an activity that has already happened.
    ///
    /// Bookkeeping is best effort: a store failure is logged and reported on the receipt,
    /// never returned, so the action that triggered it is not rolled back.
    pub fn record_activity(&self, profile_id: &ProfileId, activity: Activity) -> ActivityReceipt {
        let award = match self.resolve_award(profile_id, &activity) {
            Ok(award) => award,
            Err(error) => {
                let award = award_for(&activity, &self.config.xp);
                warn!(
                    %profile_id,
                    activity = activity.label(),
                    %error,
                    "rsvp ledger unavailable; continuing without award"
                );
                return ActivityReceipt {
                    profile_id: profile_id.clone(),
                    activity,
                    award,
                    persisted: false,
                };
            }
        };
        if award.is_empty() {
            return ActivityReceipt {
                profile_id: profile_id.clone(),
                activity,
                award,
                persisted: true,
            };
        }

        let persisted = match self.repository.apply_award(profile_id, &award) {
            Ok(()) => {
                debug!(%profile_id, activity = activity.label(), xp = award.xp, "xp awarded");
                true
            }
            Err(error) => {
                warn!(
                    %profile_id,
                    activity = activity.label(),
                    xp = award.xp,
                    %error,
                    "xp bookkeeping failed; continuing without award"
                );
                false
            }
        };

        ActivityReceipt {
            profile_id: profile_id.clone(),
            activity,
            award,
            persisted,
        }
    }

    /// Rank and feature gates for a profile.
    pub fn standing(
        &self,
        profile_id: &ProfileId,
    ) -> Result<ProfileStanding, ProfileServiceError> {
        let snapshot = self.load(profile_id)?;
        Ok(self.standing_for(&snapshot))
    }

    pub fn standing_for(&self, snapshot: &ProfileSnapshot) -> ProfileStanding {
        let counters = snapshot.counters;
        ProfileStanding {
            profile_id: snapshot.profile_id.clone(),
            display_name: snapshot.display_name.clone(),
            counters,
            rank: evaluate_rank(&counters),
            leaderboard: self.gate(GatedFeature::Leaderboard, &counters),
            vault: self.gate(GatedFeature::Vault, &counters),
        }
    }

    /// Behavioural coordinates and archetype for a profile.
    pub fn persona(&self, profile_id: &ProfileId) -> Result<PersonaView, ProfileServiceError> {
        let snapshot = self.load(profile_id)?;
        let mut view = PersonaView::classify(snapshot.analytics.as_ref());
        view.profile_id = Some(snapshot.profile_id);
        Ok(view)
    }

    /// Profiles ordered by XP (ties by id), 1-based positions.
    pub fn leaderboard(
        &self,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, ProfileServiceError> {
        let snapshots = self.repository.all()?;
        Ok(build_leaderboard(snapshots, limit))
    }

    pub fn threshold(&self, feature: GatedFeature) -> u64 {
        match feature {
            GatedFeature::Leaderboard => self.config.leaderboard_xp_threshold,
            GatedFeature::Vault => self.config.vault_ratings_threshold,
        }
    }

    // RSVPs are checked against the stored ceiling so a status pays out once per event.
    fn resolve_award(
        &self,
        profile_id: &ProfileId,
        activity: &Activity,
    ) -> Result<XpAward, RepositoryError> {
        match activity {
            Activity::Rsvp {
                event_id,
                previous,
                next: Some(next),
            } => {
                let stored = self
                    .repository
                    .raise_rsvp_ceiling(profile_id, event_id, *next)?;
                let awarded = stored.max(*previous);
                Ok(rsvp_award(*previous, Some(*next), awarded, &self.config.xp))
            }
            _ => Ok(award_for(activity, &self.config.xp)),
        }
    }

    fn gate(&self, feature: GatedFeature, counters: &ProfileCounters) -> UnlockStatus {
        unlock_status(feature.current_value(counters), self.threshold(feature))
    }

    fn load(&self, profile_id: &ProfileId) -> Result<ProfileSnapshot, ProfileServiceError> {
        let snapshot = self
            .repository
            .fetch(profile_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(snapshot)
    }
}

/// Orders snapshots for display. Shared with offline imports that have no repository.
pub fn build_leaderboard(
    mut snapshots: Vec<ProfileSnapshot>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    snapshots.sort_by(|a, b| {
        b.counters
            .xp_points
            .cmp(&a.counters.xp_points)
            .then_with(|| a.profile_id.cmp(&b.profile_id))
    });

    snapshots
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, snapshot)| LeaderboardEntry {
            position: index + 1,
            rank: evaluate_rank(&snapshot.counters),
            xp_points: snapshot.counters.xp_points,
            profile_id: snapshot.profile_id,
            display_name: snapshot.display_name,
        })
        .collect()
}

/// Outcome of a best-effort XP award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityReceipt {
    pub profile_id: ProfileId,
    pub activity: Activity,
    pub award: XpAward,
    pub persisted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStanding {
    pub profile_id: ProfileId,
    pub display_name: String,
    pub counters: ProfileCounters,
    pub rank: Rank,
    pub leaderboard: UnlockStatus,
    pub vault: UnlockStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<ProfileId>,
    pub coordinates: TypeCoordinates,
    pub key: String,
    pub archetype: ArchetypeDefinition,
}

impl PersonaView {
    pub fn classify(analytics: Option<&UserAnalytics>) -> Self {
        let coordinates = calculate_coordinates(analytics);
        Self {
            profile_id: None,
            key: coordinates.key(),
            archetype: get_archetype(&coordinates),
            coordinates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub position: usize,
    pub profile_id: ProfileId,
    pub display_name: String,
    pub xp_points: u64,
    pub rank: Rank,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
