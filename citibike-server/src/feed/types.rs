//! GBFS feed types.
//!
//! These types mirror the `station_status.json` and
//! `station_information.json` documents. Only the fields needed for
//! ranking are modelled; everything else in the feed is ignored.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use crate::geo::Coordinate;

/// Identifier joining status and information records.
///
/// Feeds disagree on whether IDs are strings or numbers; both are
/// normalised to their decimal string form so `72` and `"72"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalise a raw JSON identifier. Returns `None` for objects, arrays,
    /// booleans and null.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(match lenient::as_integer(value) {
                Some(i) => i.to_string(),
                None => n.to_string(),
            })),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level GBFS document: `{ last_updated, ttl, data: { stations } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Feed<T> {
    /// POSIX timestamp of the last feed update
    #[serde(default, deserialize_with = "lenient::integer")]
    pub last_updated: Option<i64>,

    /// Seconds before the feed should be considered stale
    #[serde(default, deserialize_with = "lenient::integer")]
    pub ttl: Option<i64>,

    #[serde(default = "Option::default")]
    pub data: Option<FeedData<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedData<T> {
    #[serde(default = "Vec::new")]
    pub stations: Vec<T>,
}

impl<T> Feed<T> {
    /// The station records, or an empty list if the document has none.
    pub fn into_stations(self) -> Vec<T> {
        self.data.map(|d| d.stations).unwrap_or_default()
    }

    /// Number of station records in the document.
    pub fn station_count(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.stations.len())
    }

    /// When the publisher last refreshed this feed.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Per-type availability breakdown (`num_bikes_available_types`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BikeTypeCounts {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub ebike: Option<i64>,

    #[serde(default, deserialize_with = "lenient::integer")]
    pub mechanical: Option<i64>,
}

/// A record from `station_status.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StationStatus {
    #[serde(default, deserialize_with = "lenient::station_id")]
    pub station_id: Option<StationId>,

    /// Total bikes available for rent, all types
    #[serde(default, deserialize_with = "lenient::integer")]
    pub num_bikes_available: Option<i64>,

    /// Legacy aggregate ebike count
    #[serde(default, deserialize_with = "lenient::integer")]
    pub num_ebikes_available: Option<i64>,

    #[serde(default, deserialize_with = "lenient::bike_types")]
    pub num_bikes_available_types: Option<BikeTypeCounts>,

    #[serde(default, deserialize_with = "lenient::integer")]
    pub num_docks_available: Option<i64>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_renting: Option<u8>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_returning: Option<u8>,

    /// POSIX timestamp of the station's last report
    #[serde(default, deserialize_with = "lenient::integer")]
    pub last_reported: Option<i64>,
}

/// A record from `station_information.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StationInfo {
    #[serde(default, deserialize_with = "lenient::station_id")]
    pub station_id: Option<StationId>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::degrees")]
    pub lat: Option<f64>,

    #[serde(default, deserialize_with = "lenient::degrees")]
    pub lon: Option<f64>,

    /// Total number of docks
    #[serde(default, deserialize_with = "lenient::integer")]
    pub capacity: Option<i64>,
}

impl StationInfo {
    /// The station location, if both components are present and finite.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)).filter(Coordinate::is_finite),
            _ => None,
        }
    }
}

pub type StationStatusFeed = Feed<StationStatus>;
pub type StationInfoFeed = Feed<StationInfo>;
