//! Nearest-station ranking.
//!
//! Joins live status with static information, measures each station's
//! distance from the query point, and returns the closest few.

mod limit;
mod merge;

pub use limit::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT, clamp_limit};
pub use merge::{
    Availability, MergedStation, merge_stations, nearest_stations, rank_by_distance,
};

#[cfg(test)]
pub(crate) use merge::fixtures;

use tracing::debug;

use crate::feed::{FeedClient, FeedError};
use crate::geo::Coordinate;

/// Fetch both feeds and return the stations nearest to `query`.
///
/// The two feeds are fetched concurrently; if either fails the whole call
/// fails and no stations are returned.
pub async fn find_nearest(
    feeds: &FeedClient,
    query: Coordinate,
    requested_limit: Option<i64>,
) -> Result<Vec<MergedStation>, FeedError> {
    let snapshot = feeds.fetch_snapshot().await?;
    let statuses = snapshot.status.into_stations();
    let infos = snapshot.information.into_stations();

    let ranked = nearest_stations(&statuses, &infos, query, requested_limit);
    debug!(
        statuses = statuses.len(),
        infos = infos.len(),
        returned = ranked.len(),
        lat = query.lat,
        lon = query.lon,
        "ranked nearest stations"
    );
    Ok(ranked)
}
