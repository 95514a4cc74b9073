//! Gamification engine behind Concerto: rank tiers, XP accounting, behavioural coordinates,
//! archetype classification and unlock gates, plus the profile service and HTTP router that
//! expose them.

pub mod config;
pub mod error;
pub mod gamification;
pub mod telemetry;
