use serde::{Deserialize, Serialize};

use super::coordinates::TypeCoordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeColor {
    Gold,
    Purple,
    Blue,
    Green,
    Red,
    Gray,
}

/// Persona label shown on the profile card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArchetypeDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub badge_color: BadgeColor,
}

const fn archetype(
    name: &'static str,
    description: &'static str,
    badge_color: BadgeColor,
) -> ArchetypeDefinition {
    ArchetypeDefinition {
        name,
        description,
        badge_color,
    }
}

/// Exact matches keyed by `commitment-social-critic`.
static ARCHETYPES: &[(&str, ArchetypeDefinition)] = &[
    (
        "4-4-4",
        archetype(
            "Headliner Held",
            "Shows up, talks the whole night and reviews every set afterwards. The full package.",
            BadgeColor::Gold,
        ),
    ),
    (
        "4-4-3",
        archetype(
            "Tourmanager",
            "Keeps the crew together, never misses a date and usually has an opinion on the mix.",
            BadgeColor::Gold,
        ),
    ),
    (
        "4-3-3",
        archetype(
            "Vaste Kern",
            "Part of the furniture. Reliable, chatty and honest about what worked.",
            BadgeColor::Green,
        ),
    ),
    (
        "4-4-0",
        archetype(
            "Frontrow Feestbeest",
            "Always there, always loud, never bothers writing it down afterwards.",
            BadgeColor::Purple,
        ),
    ),
    (
        "4-0-4",
        archetype(
            "Stille Recensent",
            "Says nothing in the group chat, attends everything and leaves a sharp review.",
            BadgeColor::Blue,
        ),
    ),
    (
        "4-0-0",
        archetype(
            "Trouwe Schaduw",
            "Never misses a show and never says a word. You only notice them in the photos.",
            BadgeColor::Gray,
        ),
    ),
    (
        "4-2-1",
        archetype(
            "Line-up Loyalist",
            "Commits early and follows through. The setlist matters more than the chat.",
            BadgeColor::Green,
        ),
    ),
    (
        "3-4-2",
        archetype(
            "Crowd Surfer",
            "Carried along by the crowd, mostly there and definitely heard.",
            BadgeColor::Purple,
        ),
    ),
    (
        "3-2-4",
        archetype(
            "Muziekjournalist",
            "Attends to take notes. Every gig ends in a verdict.",
            BadgeColor::Blue,
        ),
    ),
    (
        "3-3-3",
        archetype(
            "Gouden Middenweg",
            "Balanced on every axis. Good company at any gig.",
            BadgeColor::Green,
        ),
    ),
    (
        "3-1-1",
        archetype(
            "Stille Genieter",
            "Quietly enjoys the music and lets the others do the talking.",
            BadgeColor::Green,
        ),
    ),
    (
        "2-4-2",
        archetype(
            "Hypeman",
            "Sells every event in the chat, then decides on the day whether to go.",
            BadgeColor::Purple,
        ),
    ),
    (
        "2-1-4",
        archetype(
            "Vinyl Snob",
            "Picky about which gigs to attend and even pickier in the review.",
            BadgeColor::Blue,
        ),
    ),
    (
        "1-4-1",
        archetype(
            "Loze Belofte",
            "Promises to be there in every thread. Rarely is.",
            BadgeColor::Red,
        ),
    ),
    (
        "1-0-0",
        archetype(
            "Twijfelaar",
            "Clicks maybe, says nothing and usually stays home.",
            BadgeColor::Gray,
        ),
    ),
    (
        "0-4-4",
        archetype(
            "Bankcriticus",
            "Reviews and discusses shows they never actually made it to.",
            BadgeColor::Red,
        ),
    ),
    (
        "0-4-0",
        archetype(
            "Groepsapp Held",
            "Lives in the group chat. The venue is a rumour.",
            BadgeColor::Red,
        ),
    ),
    (
        "0-2-2",
        archetype(
            "Ticket Hoarder",
            "Grabs a spot for everything and leaves the seat empty.",
            BadgeColor::Red,
        ),
    ),
    (
        "0-0-0",
        archetype(
            "Phantom Fan",
            "An account, a name and no trace of having been anywhere.",
            BadgeColor::Gray,
        ),
    ),
];

const REVIEW_ROCKSTAR: ArchetypeDefinition = archetype(
    "Review Rockstar",
    "Every show gets a rating. The organisers read yours first.",
    BadgeColor::Gold,
);

const CHATTY_GROUPIE: ArchetypeDefinition = archetype(
    "Chatty Groupie",
    "The group chat would be silent without you.",
    BadgeColor::Purple,
);

const BACKSTAGE_SLUIPER: ArchetypeDefinition = archetype(
    "Backstage Sluiper",
    "Slips in and out without a word in the chat.",
    BadgeColor::Gray,
);

const GHOST_TICKET: ArchetypeDefinition = archetype(
    "Ghost Ticket",
    "Signs up with conviction, then vanishes before doors open.",
    BadgeColor::Red,
);

const SAM_FENDER: ArchetypeDefinition = archetype(
    "Sam Fender",
    "Seventeen going under: good intentions, shaky follow-through.",
    BadgeColor::Blue,
);

const DIEHARD_FAN: ArchetypeDefinition = archetype(
    "DieHard Fan",
    "If you said you'd be there, you are there. Every time.",
    BadgeColor::Green,
);

const FESTIVAL_GANGER: ArchetypeDefinition = archetype(
    "Festival Ganger",
    "A bit of everything: you come, you chat, you sometimes rate.",
    BadgeColor::Blue,
);

struct Fallback {
    applies: fn(&TypeCoordinates) -> bool,
    definition: ArchetypeDefinition,
}

// Evaluated in order when no exact key matches; first match wins.
static FALLBACKS: &[Fallback] = &[
    Fallback {
        applies: |c| c.critic == 4,
        definition: REVIEW_ROCKSTAR,
    },
    Fallback {
        applies: |c| c.social == 4,
        definition: CHATTY_GROUPIE,
    },
    Fallback {
        applies: |c| c.social == 0,
        definition: BACKSTAGE_SLUIPER,
    },
    Fallback {
        applies: |c| c.commitment == 0,
        definition: GHOST_TICKET,
    },
    Fallback {
        applies: |c| c.commitment == 1,
        definition: SAM_FENDER,
    },
    Fallback {
        applies: |c| c.commitment == 4,
        definition: DIEHARD_FAN,
    },
];

/// Resolves the archetype for a coordinate triple. Always returns a definition.
pub fn get_archetype(coords: &TypeCoordinates) -> ArchetypeDefinition {
    let key = coords.key();
    if let Some((_, definition)) = ARCHETYPES.iter().find(|(entry, _)| *entry == key) {
        return *definition;
    }

    FALLBACKS
        .iter()
        .find(|fallback| (fallback.applies)(coords))
        .map(|fallback| fallback.definition)
        .unwrap_or(FESTIVAL_GANGER)
}
