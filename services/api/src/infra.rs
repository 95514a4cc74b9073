use chrono::NaiveDate;
use concerto::gamification::{
    apply_award, EventId, ProfileId, ProfileRepository, ProfileSnapshot, RepositoryError,
    RsvpStatus, XpAward,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local profile store used by the demo server and CLI.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<ProfileId, ProfileSnapshot>>>,
    rsvp_ceilings: Arc<Mutex<HashMap<(ProfileId, EventId), RsvpStatus>>>,
}

impl InMemoryProfileRepository {
    pub(crate) fn insert(&self, snapshot: ProfileSnapshot) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("repository mutex poisoned");
        if guard.contains_key(&snapshot.profile_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(snapshot.profile_id.clone(), snapshot);
        Ok(())
    }

    pub(crate) fn seeded(snapshots: Vec<ProfileSnapshot>) -> Result<Self, RepositoryError> {
        let repository = Self::default();
        for snapshot in snapshots {
            repository.insert(snapshot)?;
        }
        Ok(repository)
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileSnapshot>, RepositoryError> {
        let guard = self.profiles.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn apply_award(&self, id: &ProfileId, award: &XpAward) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("repository mutex poisoned");
        let snapshot = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        snapshot.counters = apply_award(snapshot.counters, award);
        Ok(())
    }

    fn raise_rsvp_ceiling(
        &self,
        id: &ProfileId,
        event: &EventId,
        status: RsvpStatus,
    ) -> Result<Option<RsvpStatus>, RepositoryError> {
        let profiles = self.profiles.lock().expect("repository mutex poisoned");
        if !profiles.contains_key(id) {
            return Err(RepositoryError::NotFound);
        }
        let mut ceilings = self.rsvp_ceilings.lock().expect("ledger mutex poisoned");
        let key = (id.clone(), event.clone());
        let before = ceilings.get(&key).copied();
        ceilings.insert(key, before.map_or(status, |held| held.max(status)));
        Ok(before)
    }

    fn all(&self) -> Result<Vec<ProfileSnapshot>, RepositoryError> {
        let guard = self.profiles.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use concerto::gamification::{CounterKind, ProfileCounters};

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date(" 2025-06-01 ").is_ok());
        assert!(parse_date("01/06/2025").is_err());
    }

    #[test]
    fn insert_rejects_duplicates() {
        let repository = InMemoryProfileRepository::default();
        repository
            .insert(ProfileSnapshot::new("p-1", "Robin"))
            .expect("first insert");
        assert!(matches!(
            repository.insert(ProfileSnapshot::new("p-1", "Robin again")),
            Err(RepositoryError::Conflict)
        ));
    }

    #[test]
    fn apply_award_updates_counters_in_place() {
        let repository =
            InMemoryProfileRepository::seeded(vec![ProfileSnapshot::new("p-1", "Robin")])
                .expect("seeded");
        let id = ProfileId("p-1".to_string());
        repository
            .apply_award(
                &id,
                &XpAward {
                    xp: 50,
                    counter: Some(CounterKind::EventsCreated),
                },
            )
            .expect("award applied");

        let stored = repository.fetch(&id).expect("fetch").expect("present");
        assert_eq!(
            stored.counters,
            ProfileCounters {
                xp_points: 50,
                events_created: 1,
                ..ProfileCounters::default()
            }
        );
    }

    #[test]
    fn rsvp_ceiling_only_rises() {
        let repository =
            InMemoryProfileRepository::seeded(vec![ProfileSnapshot::new("p-1", "Robin")])
                .expect("seeded");
        let id = ProfileId("p-1".to_string());
        let gig = EventId("gig-1".to_string());

        let raise = |status| repository.raise_rsvp_ceiling(&id, &gig, status).expect("ledger");
        assert_eq!(raise(RsvpStatus::Interested), None);
        assert_eq!(raise(RsvpStatus::Going), Some(RsvpStatus::Interested));
        assert_eq!(raise(RsvpStatus::Interested), Some(RsvpStatus::Going));
        assert_eq!(raise(RsvpStatus::Going), Some(RsvpStatus::Going));

        let other = repository
            .raise_rsvp_ceiling(&id, &EventId("gig-2".to_string()), RsvpStatus::Going)
            .expect("ledger");
        assert_eq!(other, None);
        assert!(matches!(
            repository.raise_rsvp_ceiling(
                &ProfileId("nobody".to_string()),
                &gig,
                RsvpStatus::Going
            ),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn apply_award_to_unknown_profile_is_not_found() {
        let repository = InMemoryProfileRepository::default();
        let result = repository.apply_award(&ProfileId("nobody".to_string()), &XpAward::NONE);
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }
}
