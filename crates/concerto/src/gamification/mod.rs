//! Gamification scoring: rank tiers, XP accounting, behavioural coordinates, archetypes and
//! unlock gates.
//!
//! The engine modules (`rank`, `xp`, `coordinates`, `archetype`, `unlock`) are pure and
//! hold no state; `service` and `router` wrap them around a [`ProfileRepository`].

pub mod analytics;
pub mod archetype;
pub mod coordinates;
pub mod counters;
pub mod import;
pub mod rank;
pub mod repository;
pub mod router;
pub mod service;
pub mod unlock;
pub mod xp;

#[cfg(test)]
mod tests;

pub use analytics::{summarize, RsvpRecord};
pub use archetype::{get_archetype, ArchetypeDefinition, BadgeColor};
pub use coordinates::{calculate_coordinates, TypeCoordinates};
pub use counters::{EventId, ProfileCounters, ProfileId, ProfileSnapshot, UserAnalytics};
pub use import::{ProfileSnapshotImporter, SnapshotImportError};
pub use rank::{evaluate_rank, Glow, Rank, RankTier};
pub use repository::{ProfileRepository, RepositoryError};
pub use router::gamification_router;
pub use service::{
    build_leaderboard, ActivityReceipt, LeaderboardEntry, PersonaView, ProfileService,
    ProfileServiceError, ProfileStanding,
};
pub use unlock::{is_unlocked, unlock_status, GatedFeature, UnlockStatus};
pub use xp::{
    apply_activity, apply_award, award_for, rsvp_award, Activity, CounterKind, RsvpStatus,
    XpAward, XpSchedule,
};
