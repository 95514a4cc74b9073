use crate::gamification::XpSchedule;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub gamification: GamificationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            gamification: GamificationConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Feature gates and XP deltas for the gamification engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GamificationConfig {
    /// XP a profile needs before the leaderboard becomes visible.
    pub leaderboard_xp_threshold: u64,
    /// Ratings a profile needs to submit before the vault opens.
    pub vault_ratings_threshold: u64,
    pub xp: XpSchedule,
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            leaderboard_xp_threshold: 1000,
            vault_ratings_threshold: 10,
            xp: XpSchedule::default(),
        }
    }
}

impl GamificationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let xp = XpSchedule {
            event_created: env_number("CONCERTO_XP_EVENT_CREATED", defaults.xp.event_created)?,
            rsvp_going: env_number("CONCERTO_XP_RSVP_GOING", defaults.xp.rsvp_going)?,
            rsvp_interested: env_number(
                "CONCERTO_XP_RSVP_INTERESTED",
                defaults.xp.rsvp_interested,
            )?,
            message: env_number("CONCERTO_XP_MESSAGE", defaults.xp.message)?,
            group_joined: env_number("CONCERTO_XP_GROUP_JOIN", defaults.xp.group_joined)?,
            rating_submitted: env_number("CONCERTO_XP_RATING", defaults.xp.rating_submitted)?,
        };

        Ok(Self {
            leaderboard_xp_threshold: env_number(
                "CONCERTO_LEADERBOARD_XP_THRESHOLD",
                defaults.leaderboard_xp_threshold,
            )?,
            vault_ratings_threshold: env_number(
                "CONCERTO_VAULT_RATINGS_THRESHOLD",
                defaults.vault_ratings_threshold,
            )?,
            xp,
        })
    }
}

fn env_number<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        _ => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => write!(f, "APP_HOST must be a valid IP address"),
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
