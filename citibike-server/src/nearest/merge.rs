//! Joining status with information and ranking by distance.

use std::collections::HashMap;

use serde::Serialize;

use super::limit::clamp_limit;
use crate::feed::{StationId, StationInfo, StationStatus};
use crate::geo::Coordinate;

/// A station with both live availability and static metadata, positioned
/// relative to a query point.
///
/// Built fresh for every query and discarded once the response is written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedStation {
    pub station_id: StationId,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,

    /// Distance from the query point, rounded to the nearest meter
    pub distance_m: u64,

    pub capacity_total_docks: Option<i64>,
    pub available_total_bikes: Option<i64>,
    pub available_ebikes: Option<i64>,
    pub available_classic_bikes: Option<i64>,
    pub available_docks: Option<i64>,

    /// 1 if the station is renting bikes, 0 otherwise
    pub is_renting: u8,

    /// 1 if the station is accepting returns, 0 otherwise
    pub is_returning: u8,

    pub last_reported: Option<i64>,
}

/// Ebike/classic split for one station. `None` means unknown, which is
/// different from zero available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Availability {
    pub ebikes: Option<i64>,
    pub classic: Option<i64>,
}

impl Availability {
    /// Derive the split from a status record.
    ///
    /// | field   | 1st                                 | 2nd                             | 3rd     |
    /// |---------|-------------------------------------|---------------------------------|---------|
    /// | ebikes  | `num_bikes_available_types.ebike`   | `num_ebikes_available`          | unknown |
    /// | classic | `num_bikes_available_types.mechanical` | `max(0, total - ebikes)`     | unknown |
    pub fn from_status(status: &StationStatus) -> Self {
        let types = status.num_bikes_available_types.as_ref();

        let ebikes = match (types.and_then(|t| t.ebike), status.num_ebikes_available) {
            (Some(per_type), _) => Some(per_type),
            (None, Some(aggregate)) => Some(aggregate),
            (None, None) => None,
        };

        let classic = match (
            types.and_then(|t| t.mechanical),
            status.num_bikes_available,
            ebikes,
        ) {
            (Some(per_type), _, _) => Some(per_type),
            (None, Some(total), Some(e)) => Some((total - e).max(0)),
            _ => None,
        };

        Self { ebikes, classic }
    }
}

/// Flags default to on when the feed omits them.
fn flag_or_on(flag: Option<u8>) -> u8 {
    flag.unwrap_or(1)
}

fn merge_one(status: &StationStatus, info: &StationInfo, query: Coordinate) -> Option<MergedStation> {
    let station_id = status.station_id.clone()?;
    let location = info.coordinate()?;
    let availability = Availability::from_status(status);

    Some(MergedStation {
        station_id,
        name: info.name.clone(),
        lat: location.lat,
        lon: location.lon,
        distance_m: query.distance_to(&location).round() as u64,
        capacity_total_docks: info.capacity,
        available_total_bikes: status.num_bikes_available,
        available_ebikes: availability.ebikes,
        available_classic_bikes: availability.classic,
        available_docks: status.num_docks_available,
        is_renting: flag_or_on(status.is_renting),
        is_returning: flag_or_on(status.is_returning),
        last_reported: status.last_reported,
    })
}

/// Inner-join status records with information records by station ID.
///
/// Output follows status-feed order. Status records with no matching
/// information record, and information records without usable
/// coordinates, are dropped. When the information list repeats an ID the
/// last occurrence wins.
pub fn merge_stations(
    statuses: &[StationStatus],
    infos: &[StationInfo],
    query: Coordinate,
) -> Vec<MergedStation> {
    let by_id: HashMap<&StationId, &StationInfo> = infos
        .iter()
        .filter_map(|info| info.station_id.as_ref().map(|id| (id, info)))
        .collect();

    statuses
        .iter()
        .filter_map(|status| {
            let info = by_id.get(status.station_id.as_ref()?)?;
            merge_one(status, info, query)
        })
        .collect()
}

/// Sort by rounded distance and keep the first `limit`.
///
/// The sort is stable, so stations at the same rounded distance keep
/// their input order.
pub fn rank_by_distance(mut stations: Vec<MergedStation>, limit: usize) -> Vec<MergedStation> {
    stations.sort_by_key(|s| s.distance_m);
    stations.truncate(limit);
    stations
}

/// Merge, rank and truncate in one step.
pub fn nearest_stations(
    statuses: &[StationStatus],
    infos: &[StationInfo],
    query: Coordinate,
    requested_limit: Option<i64>,
) -> Vec<MergedStation> {
    let merged = merge_stations(statuses, infos, query);
    rank_by_distance(merged, clamp_limit(requested_limit))
}



#[cfg(test)]
mod proptests {
    use std::collections::HashSet;

    use super::fixtures::*;
    use super::*;
    use proptest::prelude::*;

    fn statuses() -> impl Strategy<Value = Vec<StationStatus>> {
        prop::collection::vec((0u8..40, 0i64..30), 0..40).prop_map(|rows| {
            rows.into_iter()
                .map(|(id, bikes)| status(&id.to_string(), bikes))
                .collect()
        })
    }

    fn infos() -> impl Strategy<Value = Vec<StationInfo>> {
        prop::collection::vec((0u8..40, 0.0f64..5_000.0), 0..40).prop_map(|rows| {
            rows.into_iter()
                .map(|(id, d)| info_at(&id.to_string(), north_of(QUERY, d)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn output_is_bounded_sorted_and_joined(
            statuses in statuses(),
            infos in infos(),
            limit in prop::option::of(-10i64..2_000),
        ) {
            let ranked = nearest_stations(&statuses, &infos, QUERY, limit);

            prop_assert!(ranked.len() <= clamp_limit(limit));
            prop_assert!(ranked.windows(2).all(|w| w[0].distance_m <= w[1].distance_m));

            let status_ids: HashSet<_> = statuses.iter().filter_map(|s| s.station_id.clone()).collect();
            let info_ids: HashSet<_> = infos.iter().filter_map(|i| i.station_id.clone()).collect();
            for s in &ranked {
                prop_assert!(status_ids.contains(&s.station_id));
                prop_assert!(info_ids.contains(&s.station_id));
            }
        }

        #[test]
        fn returns_everything_when_limit_is_large(
            statuses in statuses(),
            infos in infos(),
        ) {
            let merged = merge_stations(&statuses, &infos, QUERY);
            let ranked = nearest_stations(&statuses, &infos, QUERY, Some(50));
            prop_assert_eq!(ranked.len(), merged.len().min(50));
        }
    }
}
