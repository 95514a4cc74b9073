use serde::{Deserialize, Serialize};

use super::counters::{EventId, ProfileCounters};

/// XP awarded per activity. Defaults match the live deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpSchedule {
    pub event_created: u64,
    pub rsvp_going: u64,
    pub rsvp_interested: u64,
    pub message: u64,
    pub group_joined: u64,
    pub rating_submitted: u64,
}

impl Default for XpSchedule {
    fn default() -> Self {
        Self {
            event_created: 50,
            rsvp_going: 15,
            rsvp_interested: 5,
            message: 2,
            group_joined: 10,
            rating_submitted: 0,
        }
    }
}

/// Ordered by commitment, so `Going` ranks above `Interested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Interested,
    Going,
}

/// User activity that may earn XP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activity {
    EventCreated,
    Rsvp {
        event_id: EventId,
        #[serde(default)]
        previous: Option<RsvpStatus>,
        #[serde(default)]
        next: Option<RsvpStatus>,
    },
    Message,
    GroupJoined,
    RatingSubmitted,
}

impl Activity {
    pub const fn label(&self) -> &'static str {
        match self {
            Activity::EventCreated => "event_created",
            Activity::Rsvp { .. } => "rsvp",
            Activity::Message => "message",
            Activity::GroupJoined => "group_joined",
            Activity::RatingSubmitted => "rating_submitted",
        }
    }
}

/// Which profile counter an award bumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterKind {
    EventsCreated,
    Rsvps,
    Messages,
    Ratings,
}

/// XP delta plus the counter (if any) that a single activity increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
    pub xp: u64,
    pub counter: Option<CounterKind>,
}

impl XpAward {
    pub const NONE: XpAward = XpAward {
        xp: 0,
        counter: None,
    };

    pub fn is_empty(&self) -> bool {
        self.xp == 0 && self.counter.is_none()
    }
}

/// Computes the award for an activity.
pub fn award_for(activity: &Activity, schedule: &XpSchedule) -> XpAward {
    match activity {
        Activity::EventCreated => XpAward {
            xp: schedule.event_created,
            counter: Some(CounterKind::EventsCreated),
        },
        Activity::Rsvp { previous, next, .. } => {
            rsvp_award(*previous, *next, *previous, schedule)
        }
        Activity::Message => XpAward {
            xp: schedule.message,
            counter: Some(CounterKind::Messages),
        },
        Activity::GroupJoined => XpAward {
            xp: schedule.group_joined,
            counter: None,
        },
        Activity::RatingSubmitted => XpAward {
            xp: schedule.rating_submitted,
            counter: Some(CounterKind::Ratings),
        },
    }
}

/// Award for one RSVP transition given the highest status that already earned XP on it.
///
/// XP only ever moves up: each status pays out once per RSVP, downgrades and withdrawals
/// award nothing and claw nothing back, and only the first RSVP bumps the counter.
/// [`award_for`] passes `previous` as the ceiling; callers that track the ceiling per RSVP
/// pass their own so toggling back and forth cannot earn the going delta twice.
pub fn rsvp_award(
    previous: Option<RsvpStatus>,
    next: Option<RsvpStatus>,
    awarded: Option<RsvpStatus>,
    schedule: &XpSchedule,
) -> XpAward {
    let first_rsvp = previous.is_none() && awarded.is_none();
    match next {
        None => XpAward::NONE,
        Some(RsvpStatus::Going) if awarded == Some(RsvpStatus::Going) => XpAward::NONE,
        Some(RsvpStatus::Going) => XpAward {
            xp: schedule.rsvp_going,
            counter: first_rsvp.then_some(CounterKind::Rsvps),
        },
        Some(RsvpStatus::Interested) if first_rsvp => XpAward {
            xp: schedule.rsvp_interested,
            counter: Some(CounterKind::Rsvps),
        },
        Some(RsvpStatus::Interested) => XpAward::NONE,
    }
}

/// Folds an award into a counter snapshot.
pub fn apply_award(counters: ProfileCounters, award: &XpAward) -> ProfileCounters {
    let mut next = counters;
    next.xp_points = next.xp_points.saturating_add(award.xp);
    match award.counter {
        Some(CounterKind::EventsCreated) => {
            next.events_created = next.events_created.saturating_add(1)
        }
        Some(CounterKind::Rsvps) => next.rsvps_count = next.rsvps_count.saturating_add(1),
        Some(CounterKind::Messages) => next.messages_count = next.messages_count.saturating_add(1),
        Some(CounterKind::Ratings) => next.ratings_count = next.ratings_count.saturating_add(1),
        None => {}
    }
    next
}

/// Convenience for `apply_award(counters, &award_for(activity, schedule))`.
pub fn apply_activity(
    counters: ProfileCounters,
    activity: &Activity,
    schedule: &XpSchedule,
) -> ProfileCounters {
    apply_award(counters, &award_for(activity, schedule))
}
