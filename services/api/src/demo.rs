use crate::infra::InMemoryProfileRepository;
use chrono::{Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Args;
use concerto::config::AppConfig;
use concerto::error::AppError;
use concerto::gamification::{
    build_leaderboard, evaluate_rank, summarize, unlock_status, Activity, EventId, PersonaView,
    ProfileCounters, ProfileId, ProfileService, ProfileServiceError, ProfileSnapshot,
    ProfileSnapshotImporter, ProfileStanding, RsvpRecord, RsvpStatus, UnlockStatus, UserAnalytics,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Experience points on the profile
    #[arg(long, default_value_t = 0)]
    pub(crate) xp: u64,
    /// Events the profile has created
    #[arg(long, default_value_t = 0)]
    pub(crate) events: u32,
    /// Chat messages the profile has sent
    #[arg(long, default_value_t = 0)]
    pub(crate) messages: u32,
}

#[derive(Args, Debug)]
pub(crate) struct PersonaArgs {
    /// "Going" RSVPs
    #[arg(long, default_value_t = 0)]
    pub(crate) going: u32,
    /// "Interested" RSVPs
    #[arg(long, default_value_t = 0)]
    pub(crate) maybe: u32,
    /// Going RSVPs the user never showed up for
    #[arg(long, default_value_t = 0)]
    pub(crate) flakes: u32,
    /// Chat messages across event threads
    #[arg(long, default_value_t = 0)]
    pub(crate) messages: u32,
    /// Ratings the user has submitted
    #[arg(long, default_value_t = 0)]
    pub(crate) ratings: u32,
}

#[derive(Args, Debug)]
pub(crate) struct LeaderboardArgs {
    /// CSV export of the profiles table
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Number of rows to print
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for the RSVP history (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let counters = ProfileCounters {
        xp_points: args.xp,
        events_created: args.events,
        messages_count: args.messages,
        ..ProfileCounters::default()
    };

    let rank = evaluate_rank(&counters);
    println!("Rank {} - {}", rank.level, rank.name);
    match rank.next_level() {
        Some(level) => println!("  next tier: level {level}"),
        None => println!("  top tier reached"),
    }
    render_gate(
        "Leaderboard",
        &unlock_status(args.xp, config.gamification.leaderboard_xp_threshold),
        "xp",
    );
    Ok(())
}

pub(crate) fn run_persona(args: PersonaArgs) -> Result<(), AppError> {
    let analytics = UserAnalytics {
        rsvp_going_count: args.going,
        rsvp_maybe_count: args.maybe,
        flake_count: args.flakes,
        chat_messages_count: args.messages,
        ratings_given_count: args.ratings,
    };
    render_persona(&PersonaView::classify(Some(&analytics)));
    Ok(())
}

pub(crate) fn run_leaderboard(args: LeaderboardArgs) -> Result<(), AppError> {
    let snapshots = ProfileSnapshotImporter::from_path(&args.csv)?;
    let total = snapshots.len();
    let entries = build_leaderboard(snapshots, args.limit);

    println!("Leaderboard ({} of {} profiles)", entries.len(), total);
    for entry in entries {
        println!(
            "  {:>3}. {:<24} {:>7} xp  {}",
            entry.position, entry.display_name, entry.xp_points, entry.rank.name
        );
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let config = AppConfig::load()?.gamification;

    let repository =
        InMemoryProfileRepository::seeded(vec![ProfileSnapshot::new("demo", "Demo Fan")])
            .map_err(ProfileServiceError::from)?;
    let service = ProfileService::new(Arc::new(repository), config);
    let profile = ProfileId("demo".to_string());

    println!("Concerto gamification demo ({today})");
    render_standing(&service.standing(&profile)?);

    let stages: Vec<(&str, Vec<Activity>)> = vec![
        ("Creates three events", vec![Activity::EventCreated; 3]),
        (
            "RSVPs interested, then commits",
            vec![
                Activity::Rsvp {
                    event_id: EventId("demo-gig".to_string()),
                    previous: None,
                    next: Some(RsvpStatus::Interested),
                },
                Activity::Rsvp {
                    event_id: EventId("demo-gig".to_string()),
                    previous: Some(RsvpStatus::Interested),
                    next: Some(RsvpStatus::Going),
                },
                Activity::Rsvp {
                    event_id: EventId("demo-gig".to_string()),
                    previous: Some(RsvpStatus::Going),
                    next: Some(RsvpStatus::Going),
                },
            ],
        ),
        ("Joins a group via invite code", vec![Activity::GroupJoined]),
        ("Sends 60 chat messages", vec![Activity::Message; 60]),
    ];

    for (label, activities) in stages {
        let awarded: u64 = activities
            .into_iter()
            .map(|activity| service.record_activity(&profile, activity))
            .filter(|receipt| receipt.persisted)
            .map(|receipt| receipt.award.xp)
            .sum();
        println!("\n{label}: +{awarded} xp");
        render_standing(&service.standing(&profile)?);
    }

    let as_of = Utc.from_utc_datetime(&today.and_time(NaiveTime::MIN));
    let history = sample_history(as_of);
    let analytics = summarize(&history, as_of);
    println!(
        "\nRSVP history: {} going, {} maybe, {} flake(s), {} rating(s)",
        analytics.rsvp_going_count,
        analytics.rsvp_maybe_count,
        analytics.flake_count,
        analytics.ratings_given_count
    );
    render_persona(&PersonaView::classify(Some(&analytics)));

    Ok(())
}

/// Profiles loaded into the in-memory store when the server starts.
pub(crate) fn sample_profiles() -> Vec<ProfileSnapshot> {
    let profile = |id: &str,
                   name: &str,
                   counters: ProfileCounters,
                   analytics: Option<UserAnalytics>| ProfileSnapshot {
        profile_id: ProfileId(id.to_string()),
        display_name: name.to_string(),
        counters,
        analytics,
    };

    vec![
        profile(
            "lotte",
            "Lotte",
            ProfileCounters {
                xp_points: 15_420,
                events_created: 17,
                messages_count: 812,
                rsvps_count: 64,
                ratings_count: 31,
            },
            Some(UserAnalytics {
                rsvp_going_count: 58,
                rsvp_maybe_count: 6,
                flake_count: 0,
                chat_messages_count: 812,
                ratings_given_count: 31,
            }),
        ),
        profile(
            "daan",
            "Daan",
            ProfileCounters {
                xp_points: 5_310,
                events_created: 2,
                messages_count: 344,
                rsvps_count: 40,
                ratings_count: 2,
            },
            Some(UserAnalytics {
                rsvp_going_count: 12,
                rsvp_maybe_count: 28,
                flake_count: 2,
                chat_messages_count: 344,
                ratings_given_count: 2,
            }),
        ),
        profile(
            "noor",
            "Noor",
            ProfileCounters {
                xp_points: 1_740,
                events_created: 0,
                messages_count: 4,
                rsvps_count: 22,
                ratings_count: 18,
            },
            Some(UserAnalytics {
                rsvp_going_count: 21,
                rsvp_maybe_count: 1,
                flake_count: 0,
                chat_messages_count: 4,
                ratings_given_count: 18,
            }),
        ),
        profile(
            "sem",
            "Sem",
            ProfileCounters {
                xp_points: 460,
                events_created: 1,
                messages_count: 30,
                rsvps_count: 9,
                ratings_count: 0,
            },
            None,
        ),
        profile("tess", "Tess", ProfileCounters::default(), None),
    ]
}

fn sample_history(as_of: chrono::DateTime<Utc>) -> Vec<RsvpRecord> {
    let record = |status: RsvpStatus,
                  days: i64,
                  attendance_confirmed: bool,
                  rated: bool,
                  messages: u32| RsvpRecord {
        status,
        event_ends_at: as_of + Duration::days(days),
        attendance_confirmed,
        rated,
        messages,
    };

    vec![
        record(RsvpStatus::Going, -40, true, true, 14),
        record(RsvpStatus::Going, -28, true, false, 9),
        record(RsvpStatus::Going, -21, false, true, 3),
        record(RsvpStatus::Going, -12, false, false, 0),
        record(RsvpStatus::Interested, -7, false, false, 2),
        record(RsvpStatus::Going, 5, false, false, 11),
    ]
}

fn render_standing(standing: &ProfileStanding) {
    println!(
        "  {} | {} xp | rank {} ({})",
        standing.display_name, standing.counters.xp_points, standing.rank.level, standing.rank.name
    );
    render_gate("Leaderboard", &standing.leaderboard, "xp");
    render_gate("Vault", &standing.vault, "rating(s)");
}

fn render_gate(label: &str, status: &UnlockStatus, unit: &str) {
    if status.is_unlocked {
        println!("  {label}: unlocked");
    } else {
        println!(
            "  {label}: {:.0}% ({} {unit} to go)",
            status.progress_percent, status.remaining
        );
    }
}

fn render_persona(view: &PersonaView) {
    println!(
        "Coordinates {} (commitment {}, social {}, critic {})",
        view.key, view.coordinates.commitment, view.coordinates.social, view.coordinates.critic
    );
    println!(
        "  {} [{:?}] {}",
        view.archetype.name, view.archetype.badge_color, view.archetype.description
    );
}
