//! Integration specifications for the gamification engine, exercised through the public facade
//! only: counters in, rank/coordinates/archetype/unlock status out.

use concerto::gamification::{
    apply_activity, calculate_coordinates, evaluate_rank, get_archetype, is_unlocked,
    unlock_status, Activity, BadgeColor, EventId, ProfileCounters, RankTier, RsvpStatus,
    TypeCoordinates, UserAnalytics, XpSchedule,
};

fn counters(xp_points: u64, events_created: u32, messages_count: u32) -> ProfileCounters {
    ProfileCounters {
        xp_points,
        events_created,
        messages_count,
        ..ProfileCounters::default()
    }
}

#[test]
fn icon_holds_for_arbitrarily_large_counters() {
    for scale in [1u64, 10, 1_000, 1_000_000] {
        let input = counters(15_001 * scale, 15 * scale as u32, 500 * scale as u32);
        assert_eq!(evaluate_rank(&input).level, 8, "scale {scale}");
    }
}

#[test]
fn zero_counters_rank_as_tourist() {
    let rank = evaluate_rank(&counters(0, 0, 0));
    assert_eq!(rank.level, 0);
    assert_eq!(rank.name, "The Tourist");
}

#[test]
fn a_new_user_climbs_by_creating_events_and_chatting() {
    let schedule = XpSchedule::default();
    let mut profile = ProfileCounters::default();

    profile = apply_activity(profile, &Activity::EventCreated, &schedule);
    assert_eq!(evaluate_rank(&profile).tier, RankTier::Regular);

    for _ in 0..20 {
        profile = apply_activity(profile, &Activity::EventCreated, &schedule);
    }
    for _ in 0..100 {
        profile = apply_activity(profile, &Activity::Message, &schedule);
    }
    profile = apply_activity(
        profile,
        &Activity::Rsvp {
            event_id: EventId("gig-1".to_string()),
            previous: None,
            next: Some(RsvpStatus::Going),
        },
        &schedule,
    );

    assert_eq!(profile.xp_points, 21 * 50 + 100 * 2 + 15);
    assert_eq!(profile.events_created, 21);
    assert_eq!(profile.messages_count, 100);
    assert_eq!(profile.rsvps_count, 1);
    // 1265 xp with 21 events: Booker, not yet Vibe Manager (needs 1500 xp).
    assert_eq!(evaluate_rank(&profile).tier, RankTier::Booker);
}

#[test]
fn null_analytics_classifies_as_neutral() {
    let coords = calculate_coordinates(None);
    assert_eq!(
        coords,
        TypeCoordinates {
            commitment: 2,
            social: 0,
            critic: 2
        }
    );
}

#[test]
fn ninety_percent_attendance_with_three_events_is_committed() {
    let analytics = UserAnalytics {
        rsvp_going_count: 9,
        rsvp_maybe_count: 1,
        ..UserAnalytics::default()
    };
    assert_eq!(calculate_coordinates(Some(&analytics)).commitment, 4);
}

#[test]
fn perfect_coordinates_are_headliner_held() {
    let definition = get_archetype(&TypeCoordinates {
        commitment: 4,
        social: 4,
        critic: 4,
    });
    assert_eq!(definition.name, "Headliner Held");
    assert_eq!(definition.badge_color, BadgeColor::Gold);
}

#[test]
fn unmatched_neutral_coordinates_fall_back_to_festival_ganger() {
    let definition = get_archetype(&TypeCoordinates {
        commitment: 2,
        social: 2,
        critic: 2,
    });
    assert_eq!(definition.name, "Festival Ganger");
}

#[test]
fn unlock_gate_boundaries() {
    assert!(is_unlocked(1000, 1000));
    assert!(!is_unlocked(999, 1000));
    let status = unlock_status(5_000, 1_000);
    assert_eq!(status.progress_percent, 100.0);
    assert_eq!(status.remaining, 0);
}

#[test]
fn classification_pipeline_is_deterministic() {
    let analytics = UserAnalytics {
        rsvp_going_count: 12,
        rsvp_maybe_count: 5,
        flake_count: 1,
        chat_messages_count: 64,
        ratings_given_count: 4,
    };
    let first = get_archetype(&calculate_coordinates(Some(&analytics)));
    let second = get_archetype(&calculate_coordinates(Some(&analytics)));
    assert_eq!(first, second);

    let profile = counters(3_000, 4, 120);
    assert_eq!(evaluate_rank(&profile), evaluate_rank(&profile));
}
