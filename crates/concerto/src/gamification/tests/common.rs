use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::GamificationConfig;
use crate::gamification::counters::{
    EventId, ProfileCounters, ProfileId, ProfileSnapshot, UserAnalytics,
};
use crate::gamification::repository::{ProfileRepository, RepositoryError};
use crate::gamification::service::ProfileService;
use crate::gamification::xp::{apply_award, RsvpStatus, XpAward};
use crate::gamification::{gamification_router, ProfileSnapshotImporter};

pub(super) fn gamification_config() -> GamificationConfig {
    GamificationConfig::default()
}

pub(super) fn snapshot(id: &str, xp_points: u64, events: u32, messages: u32) -> ProfileSnapshot {
    ProfileSnapshot {
        profile_id: ProfileId(id.to_string()),
        display_name: format!("Fan {id}"),
        counters: ProfileCounters {
            xp_points,
            events_created: events,
            messages_count: messages,
            rsvps_count: 0,
            ratings_count: 0,
        },
        analytics: None,
    }
}

pub(super) fn devoted_fan() -> ProfileSnapshot {
    let mut snapshot = snapshot("devoted", 16_200, 18, 640);
    snapshot.counters.ratings_count = 12;
    snapshot.analytics = Some(UserAnalytics {
        rsvp_going_count: 20,
        rsvp_maybe_count: 1,
        flake_count: 0,
        chat_messages_count: 640,
        ratings_given_count: 19,
    });
    snapshot
}

/// Three profiles exported the way the profiles table dump looks.
pub(super) fn seeded_profiles() -> Vec<ProfileSnapshot> {
    let csv = "profile_id,display_name,xp_points,events_created,messages_count,rsvps_count,ratings_count\n\
               p-ava,Ava,2600,1,120,12,4\n\
               p-bram,Bram,2600,0,40,8,1\n\
               p-cas,Cas,90,0,0,1,0\n";
    ProfileSnapshotImporter::from_reader(csv.as_bytes()).expect("fixture csv parses")
}

pub(super) fn build_service() -> (ProfileService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    for snapshot in seeded_profiles() {
        repository.seed(snapshot);
    }
    repository.seed(devoted_fan());
    let service = ProfileService::new(repository.clone(), gamification_config());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) profiles: Arc<Mutex<HashMap<ProfileId, ProfileSnapshot>>>,
    pub(super) rsvp_ceilings: Arc<Mutex<HashMap<(ProfileId, EventId), RsvpStatus>>>,
}

impl MemoryRepository {
    pub(super) fn seed(&self, snapshot: ProfileSnapshot) {
        self.profiles
            .lock()
            .expect("repository mutex poisoned")
            .insert(snapshot.profile_id.clone(), snapshot);
    }

    pub(super) fn counters(&self, id: &str) -> ProfileCounters {
        self.profiles
            .lock()
            .expect("repository mutex poisoned")
            .get(&ProfileId(id.to_string()))
            .map(|snapshot| snapshot.counters)
            .expect("profile seeded")
    }
}

impl ProfileRepository for MemoryRepository {
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
        if !self
            .profiles
            .lock()
            .expect("repository mutex poisoned")
            .contains_key(id)
        {
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

/// Reads succeed, every write fails.
pub(super) struct ReadOnlyRepository {
    pub(super) inner: MemoryRepository,
}

impl ProfileRepository for ReadOnlyRepository {
    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileSnapshot>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn apply_award(&self, _id: &ProfileId, _award: &XpAward) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("replica is read only".to_string()))
    }

    fn raise_rsvp_ceiling(
        &self,
        _id: &ProfileId,
        _event: &EventId,
        _status: RsvpStatus,
    ) -> Result<Option<RsvpStatus>, RepositoryError> {
        Err(RepositoryError::Unavailable("replica is read only".to_string()))
    }

    fn all(&self) -> Result<Vec<ProfileSnapshot>, RepositoryError> {
        self.inner.all()
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn fetch(&self, _id: &ProfileId) -> Result<Option<ProfileSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn apply_award(&self, _id: &ProfileId, _award: &XpAward) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn raise_rsvp_ceiling(
        &self,
        _id: &ProfileId,
        _event: &EventId,
        _status: RsvpStatus,
    ) -> Result<Option<RsvpStatus>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<ProfileSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: ProfileService<MemoryRepository>) -> axum::Router {
    gamification_router(Arc::new(service))
}
