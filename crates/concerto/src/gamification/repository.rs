use super::counters::{EventId, ProfileId, ProfileSnapshot};
use super::xp::{RsvpStatus, XpAward};

/// Storage abstraction for profile counters so the service can be exercised in isolation.
///
/// Implementations must apply an award atomically: concurrent awards to the same profile
/// are the store's problem, the engine only ever reads a resolved snapshot.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileSnapshot>, RepositoryError>;
    fn apply_award(&self, id: &ProfileId, award: &XpAward) -> Result<(), RepositoryError>;
    /// Raises the highest awarded status on one RSVP to at least `status` and returns the
    /// value held before the call. The ceiling never drops, and the swap must be atomic.
    fn raise_rsvp_ceiling(
        &self,
        id: &ProfileId,
        event: &EventId,
        status: RsvpStatus,
    ) -> Result<Option<RsvpStatus>, RepositoryError>;
    fn all(&self) -> Result<Vec<ProfileSnapshot>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("profile not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
