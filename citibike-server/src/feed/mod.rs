//! GBFS feed client.
//!
//! Fetches the two documents the ranker needs:
//! - `station_status.json`: live availability, refreshed every few seconds
//! - `station_information.json`: names, coordinates and capacity
//!
//! Both are fetched fresh on every call. Nothing is cached.

mod client;
mod error;
mod lenient;
mod types;

pub use client::{
    DEFAULT_INFORMATION_URL, DEFAULT_STATUS_URL, FeedClient, FeedConfig, FeedSnapshot,
};
pub use error::FeedError;
pub use types::{
    BikeTypeCounts, Feed, FeedData, StationId, StationInfo, StationInfoFeed, StationStatus,
    StationStatusFeed,
};
