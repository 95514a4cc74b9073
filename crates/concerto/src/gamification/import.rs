use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::counters::{ProfileCounters, ProfileId, ProfileSnapshot, UserAnalytics};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotImportError {
    #[error("failed to read profile export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid profile CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads profile snapshots from a CSV export of the profiles table.
pub struct ProfileSnapshotImporter;

impl ProfileSnapshotImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ProfileSnapshot>, SnapshotImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ProfileSnapshot>, SnapshotImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut snapshots = Vec::new();
        for record in csv_reader.deserialize::<ProfileRow>() {
            snapshots.push(record?.into_snapshot());
        }

        Ok(snapshots)
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    profile_id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default, deserialize_with = "blank_as_zero")]
    xp_points: u64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    events_created: u32,
    #[serde(default, deserialize_with = "blank_as_zero")]
    messages_count: u32,
    #[serde(default, deserialize_with = "blank_as_zero")]
    rsvps_count: u32,
    #[serde(default, deserialize_with = "blank_as_zero")]
    ratings_count: u32,
    #[serde(default, deserialize_with = "blank_as_none")]
    rsvp_going_count: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    rsvp_maybe_count: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    flake_count: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    chat_messages_count: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    ratings_given_count: Option<u32>,
}

impl ProfileRow {
    fn into_snapshot(self) -> ProfileSnapshot {
        let analytics_columns = [
            self.rsvp_going_count,
            self.rsvp_maybe_count,
            self.flake_count,
            self.chat_messages_count,
            self.ratings_given_count,
        ];
        let analytics = analytics_columns
            .iter()
            .any(Option::is_some)
            .then(|| UserAnalytics {
                rsvp_going_count: self.rsvp_going_count.unwrap_or_default(),
                rsvp_maybe_count: self.rsvp_maybe_count.unwrap_or_default(),
                flake_count: self.flake_count.unwrap_or_default(),
                chat_messages_count: self.chat_messages_count.unwrap_or_default(),
                ratings_given_count: self.ratings_given_count.unwrap_or_default(),
            });

        let display_name = if self.display_name.is_empty() {
            self.profile_id.clone()
        } else {
            self.display_name
        };

        ProfileSnapshot {
            profile_id: ProfileId(self.profile_id),
            display_name,
            counters: ProfileCounters {
                xp_points: self.xp_points,
                events_created: self.events_created,
                messages_count: self.messages_count,
                rsvps_count: self.rsvps_count,
                ratings_count: self.ratings_count,
            },
            analytics,
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn blank_as_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(value) => value.parse::<T>().map_err(serde::de::Error::custom),
    }
}
