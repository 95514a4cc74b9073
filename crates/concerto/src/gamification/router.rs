use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::counters::{ProfileCounters, ProfileId, UserAnalytics};
use super::rank::evaluate_rank;
use super::repository::{ProfileRepository, RepositoryError};
use super::service::{PersonaView, ProfileService, ProfileServiceError};
use super::unlock::unlock_status;
use super::xp::Activity;

const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Router exposing profile standing, persona, activity and the stateless calculators.
pub fn gamification_router<R>(service: Arc<ProfileService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/profiles/:profile_id/standing",
            get(standing_handler::<R>),
        )
        .route(
            "/api/v1/profiles/:profile_id/persona",
            get(persona_handler::<R>),
        )
        .route(
            "/api/v1/profiles/:profile_id/activity",
            post(activity_handler::<R>),
        )
        .route("/api/v1/leaderboard", get(leaderboard_handler::<R>))
        .route("/api/v1/rank/evaluate", post(evaluate_rank_handler))
        .route("/api/v1/persona/classify", post(classify_handler))
        .route("/api/v1/unlock", post(unlock_handler))
        .with_state(service)
}

pub(crate) async fn standing_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.standing(&ProfileId(profile_id)) {
        Ok(standing) => (StatusCode::OK, Json(standing)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn persona_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.persona(&ProfileId(profile_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn activity_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(profile_id): Path<String>,
    Json(activity): Json<Activity>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let receipt = service.record_activity(&ProfileId(profile_id), activity);
    (StatusCode::ACCEPTED, Json(receipt)).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LeaderboardQuery {
    limit: Option<usize>,
}

pub(crate) async fn leaderboard_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Query(query): Query<LeaderboardQuery>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT);

    match service.leaderboard(limit) {
        Ok(entries) => (StatusCode::OK, Json(json!({ "entries": entries }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_rank_handler(Json(counters): Json<ProfileCounters>) -> Response {
    (StatusCode::OK, Json(evaluate_rank(&counters))).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClassifyRequest {
    #[serde(default)]
    analytics: Option<UserAnalytics>,
}

pub(crate) async fn classify_handler(Json(request): Json<ClassifyRequest>) -> Response {
    let view = PersonaView::classify(request.analytics.as_ref());
    (StatusCode::OK, Json(view)).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct UnlockRequest {
    current_value: u64,
    threshold: u64,
}

pub(crate) async fn unlock_handler(Json(request): Json<UnlockRequest>) -> Response {
    let status = unlock_status(request.current_value, request.threshold);
    (StatusCode::OK, Json(status)).into_response()
}

fn error_response(error: ProfileServiceError) -> Response {
    let status = match &error {
        ProfileServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ProfileServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
