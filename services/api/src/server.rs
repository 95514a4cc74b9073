use crate::cli::ServeArgs;
use crate::demo::sample_profiles;
use crate::infra::{AppState, InMemoryProfileRepository};
use crate::routes::with_gamification_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use concerto::config::{AppConfig, AppEnvironment};
use concerto::error::AppError;
use concerto::gamification::ProfileService;
use concerto::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(profile_store(config.environment));
    let service = Arc::new(ProfileService::new(
        repository,
        config.gamification.clone(),
    ));

    let app = with_gamification_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        leaderboard_threshold = config.gamification.leaderboard_xp_threshold,
        vault_threshold = config.gamification.vault_ratings_threshold,
        "concerto gamification service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Sample profiles are only loaded outside production.
fn profile_store(environment: AppEnvironment) -> InMemoryProfileRepository {
    let repository = InMemoryProfileRepository::default();
    if environment == AppEnvironment::Production {
        return repository;
    }
    for snapshot in sample_profiles() {
        if let Err(error) = repository.insert(snapshot) {
            warn!(%error, "skipping sample profile");
        }
    }
    repository
}
