use serde::{Deserialize, Serialize};

use super::counters::ProfileCounters;

/// The nine rank tiers, ordered from newcomer to top contributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankTier {
    Tourist,
    Roadie,
    Regular,
    Booker,
    VibeManager,
    PartyAnimal,
    Headliner,
    Legend,
    Icon,
}

impl RankTier {
    pub const ALL: [RankTier; 9] = [
        RankTier::Tourist,
        RankTier::Roadie,
        RankTier::Regular,
        RankTier::Booker,
        RankTier::VibeManager,
        RankTier::PartyAnimal,
        RankTier::Headliner,
        RankTier::Legend,
        RankTier::Icon,
    ];

    pub const fn level(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            RankTier::Tourist => "The Tourist",
            RankTier::Roadie => "The Roadie",
            RankTier::Regular => "The Regular",
            RankTier::Booker => "The Booker",
            RankTier::VibeManager => "Vibe Manager",
            RankTier::PartyAnimal => "Party Animal",
            RankTier::Headliner => "The Headliner",
            RankTier::Legend => "The Legend",
            RankTier::Icon => "The Icon",
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(usize::from(level)).copied()
    }

    const fn border_color(self) -> &'static str {
        match self {
            RankTier::Tourist => "#9ca3af",
            RankTier::Roadie => "#a16207",
            RankTier::Regular => "#2563eb",
            RankTier::Booker => "#0d9488",
            RankTier::VibeManager => "#7c3aed",
            RankTier::PartyAnimal => "#db2777",
            RankTier::Headliner => "#ea580c",
            RankTier::Legend => "#eab308",
            RankTier::Icon => "#f59e0b",
        }
    }

    const fn glow(self) -> Glow {
        match self {
            RankTier::Tourist | RankTier::Roadie | RankTier::Regular => Glow::None,
            RankTier::Booker | RankTier::VibeManager => Glow::Soft,
            RankTier::PartyAnimal | RankTier::Headliner => Glow::Pulse,
            RankTier::Legend | RankTier::Icon => Glow::Blaze,
        }
    }

    const fn icon(self) -> Option<&'static str> {
        match self {
            RankTier::Tourist => None,
            RankTier::Roadie => Some("backpack"),
            RankTier::Regular => Some("ticket"),
            RankTier::Booker => Some("calendar"),
            RankTier::VibeManager => Some("sparkles"),
            RankTier::PartyAnimal => Some("party-popper"),
            RankTier::Headliner => Some("mic"),
            RankTier::Legend => Some("crown"),
            RankTier::Icon => Some("star"),
        }
    }
}

/// Halo drawn around the avatar badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glow {
    None,
    Soft,
    Pulse,
    Blaze,
}

/// Display-ready rank. Recomputed from counters on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rank {
    pub tier: RankTier,
    pub level: u8,
    pub name: &'static str,
    pub border_color: &'static str,
    pub glow: Glow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
}

impl Rank {
    pub const fn of(tier: RankTier) -> Self {
        Self {
            tier,
            level: tier.level(),
            name: tier.label(),
            border_color: tier.border_color(),
            glow: tier.glow(),
            icon: tier.icon(),
        }
    }

    /// Level of the next tier, or `None` at the top.
    pub fn next_level(&self) -> Option<u8> {
        RankTier::from_level(self.level + 1).map(RankTier::level)
    }
}

struct RankRule {
    tier: RankTier,
    qualifies: fn(&ProfileCounters) -> bool,
}

// Predicates overlap; order is the tie-break, first match wins.
static RANK_RULES: &[RankRule] = &[
    RankRule {
        tier: RankTier::Icon,
        qualifies: |c| c.xp_points > 15_000 && c.events_created >= 15 && c.messages_count >= 500,
    },
    RankRule {
        tier: RankTier::Legend,
        qualifies: |c| c.xp_points > 8_500 && c.events_created >= 10,
    },
    RankRule {
        tier: RankTier::Headliner,
        qualifies: |c| c.xp_points > 5_000 && (c.events_created >= 5 || c.messages_count >= 300),
    },
    RankRule {
        tier: RankTier::PartyAnimal,
        qualifies: |c| c.xp_points > 2_500 && c.messages_count >= 100,
    },
    RankRule {
        tier: RankTier::VibeManager,
        qualifies: |c| c.xp_points > 1_500 && c.messages_count >= 50,
    },
    RankRule {
        tier: RankTier::Booker,
        qualifies: |c| c.xp_points > 1_000 && c.events_created >= 3,
    },
    RankRule {
        tier: RankTier::Regular,
        qualifies: |c| c.xp_points > 500 || c.events_created >= 1,
    },
    RankRule {
        tier: RankTier::Roadie,
        qualifies: |c| c.xp_points > 100,
    },
];

/// Maps profile counters to a rank. Only xp, events created and messages count.
pub fn evaluate_rank(counters: &ProfileCounters) -> Rank {
    let tier = RANK_RULES
        .iter()
        .find(|rule| (rule.qualifies)(counters))
        .map(|rule| rule.tier)
        .unwrap_or(RankTier::Tourist);

    Rank::of(tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(xp_points: u64, events_created: u32, messages_count: u32) -> ProfileCounters {
        ProfileCounters {
            xp_points,
            events_created,
            messages_count,
            ..ProfileCounters::default()
        }
    }

    #[test]
    fn empty_profile_is_a_tourist() {
        let rank = evaluate_rank(&ProfileCounters::default());
        assert_eq!(rank.level, 0);
        assert_eq!(rank.name, "The Tourist");
        assert_eq!(rank.glow, Glow::None);
        assert!(rank.icon.is_none());
    }

    #[test]
    fn icon_requires_all_three_counters() {
        assert_eq!(evaluate_rank(&counters(15_001, 15, 500)).tier, RankTier::Icon);
        assert_eq!(
            evaluate_rank(&counters(u64::MAX, u32::MAX, u32::MAX)).tier,
            RankTier::Icon
        );
        // Exactly 15000 xp is not strictly greater.
        assert_eq!(evaluate_rank(&counters(15_000, 15, 500)).tier, RankTier::Legend);
        assert_eq!(evaluate_rank(&counters(20_000, 15, 499)).tier, RankTier::Legend);
    }

    #[test]
    fn cascade_walks_each_tier() {
        let cases = [
            (counters(8_501, 10, 0), RankTier::Legend),
            (counters(5_001, 5, 0), RankTier::Headliner),
            (counters(5_001, 0, 300), RankTier::Headliner),
            (counters(2_501, 0, 100), RankTier::PartyAnimal),
            (counters(1_501, 0, 50), RankTier::VibeManager),
            (counters(1_001, 3, 0), RankTier::Booker),
            (counters(501, 0, 0), RankTier::Regular),
            (counters(0, 1, 0), RankTier::Regular),
            (counters(101, 0, 0), RankTier::Roadie),
            (counters(100, 0, 0), RankTier::Tourist),
        ];

        for (input, expected) in cases {
            assert_eq!(evaluate_rank(&input).tier, expected, "counters {input:?}");
        }
    }

    #[test]
    fn high_xp_without_activity_stays_regular() {
        assert_eq!(evaluate_rank(&counters(50_000, 0, 0)).tier, RankTier::Regular);
        assert_eq!(evaluate_rank(&counters(9_000, 9, 0)).tier, RankTier::Headliner);
    }

    #[test]
    fn raising_xp_never_lowers_the_level() {
        for events in [0, 1, 3, 5, 10, 15] {
            for messages in [0, 50, 100, 300, 500] {
                let mut previous = 0;
                for xp in (0..=20_000).step_by(50) {
                    let level = evaluate_rank(&counters(xp, events, messages)).level;
                    assert!(
                        level >= previous,
                        "level dropped at xp {xp}, events {events}, messages {messages}"
                    );
                    previous = level;
                }
            }
        }
    }

    #[test]
    fn ignores_rsvp_and_rating_counters() {
        let base = counters(600, 0, 0);
        let busy = ProfileCounters {
            rsvps_count: 400,
            ratings_count: 90,
            ..base
        };
        assert_eq!(evaluate_rank(&base), evaluate_rank(&busy));
    }

    #[test]
    fn next_level_stops_at_the_top() {
        assert_eq!(Rank::of(RankTier::Tourist).next_level(), Some(1));
        assert_eq!(Rank::of(RankTier::Legend).next_level(), Some(8));
        assert_eq!(Rank::of(RankTier::Icon).next_level(), None);
    }

    #[test]
    fn levels_match_tier_order() {
        for (index, tier) in RankTier::ALL.iter().enumerate() {
            assert_eq!(usize::from(tier.level()), index);
            assert_eq!(RankTier::from_level(tier.level()), Some(*tier));
        }
        assert_eq!(RankTier::from_level(9), None);
    }
}
