//! Tool input validation and output payload.

use std::fmt;

use schemars::JsonSchema;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::feed::{FeedClient, FeedError};
use crate::geo::Coordinate;
use crate::nearest::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT, MergedStation, find_nearest};

/// Arguments to `nearest_citibikes`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct NearestRequest {
    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lon: f64,

    /// Max stations to return (1-50). Default 5
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "whole_number"
    )]
    #[schemars(with = "Option<i64>", range(min = 1, max = 50))]
    pub limit: Option<i64>,
}

/// Integers, including whole floats like `3.0`. Fractions are rejected.
/// Query strings deliver numbers as text, so numeric strings are parsed too.
fn whole_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    struct WholeNumber;

    impl<'de> Visitor<'de> for WholeNumber {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            i64::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                Ok(Some(v as i64))
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            match v.trim().parse::<f64>() {
                Ok(f) => self.visit_f64(f),
                Err(_) => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }

    d.deserialize_any(WholeNumber)
}

/// Rejected tool input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("limit must be an integer between 1 and 50, got {0}")]
    LimitOutOfRange(i64),
}

/// A request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedQuery {
    pub coordinate: Coordinate,
    pub limit: Option<i64>,
}

impl NearestRequest {
    /// Check the request before any network call is made.
    pub fn validate(&self) -> Result<ValidatedQuery, RequestError> {
        if !self.lat.is_finite() {
            return Err(RequestError::NotFinite { field: "lat" });
        }
        if !self.lon.is_finite() {
            return Err(RequestError::NotFinite { field: "lon" });
        }
        match self.limit {
            Some(limit) if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) => {
                return Err(RequestError::LimitOutOfRange(limit));
            }
            _ => {}
        }

        Ok(ValidatedQuery {
            coordinate: Coordinate::new(self.lat, self.lon),
            limit: self.limit,
        })
    }
}

/// The query as echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EchoedQuery {
    pub lat: f64,
    pub lon: f64,
    pub limit: i64,
}

/// Tool output: the echoed query and the ranked stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestResponse {
    pub query: EchoedQuery,
    pub stations: Vec<MergedStation>,
}

impl NearestResponse {
    pub fn new(query: ValidatedQuery, stations: Vec<MergedStation>) -> Self {
        Self {
            query: EchoedQuery {
                lat: query.coordinate.lat,
                lon: query.coordinate.lon,
                limit: query.limit.unwrap_or(DEFAULT_LIMIT),
            },
            stations,
        }
    }

    /// Render as indented JSON text.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Run a validated query against the feeds.
pub async fn respond(
    feeds: &FeedClient,
    query: ValidatedQuery,
) -> Result<NearestResponse, FeedError> {
    let stations = find_nearest(feeds, query.coordinate, query.limit).await?;
    Ok(NearestResponse::new(query, stations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(lat: f64, lon: f64, limit: Option<i64>) -> NearestRequest {
        NearestRequest { lat, lon, limit }
    }

    #[test]
    fn accepts_valid_input() {
        let q = request(40.73, -73.99, Some(3)).validate().unwrap();
        assert_eq!(q.coordinate, Coordinate::new(40.73, -73.99));
        assert_eq!(q.limit, Some(3));

        let q = request(40.73, -73.99, None).validate().unwrap();
        assert_eq!(q.limit, None);
    }

    #[test]
    fn rejects_out_of_range_limit() {
        assert_eq!(
            request(40.73, -73.99, Some(0)).validate(),
            Err(RequestError::LimitOutOfRange(0))
        );
        assert_eq!(
            request(40.73, -73.99, Some(51)).validate(),
            Err(RequestError::LimitOutOfRange(51))
        );
        assert!(request(40.73, -73.99, Some(1)).validate().is_ok());
        assert!(request(40.73, -73.99, Some(50)).validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert_eq!(
            request(f64::NAN, -73.99, None).validate(),
            Err(RequestError::NotFinite { field: "lat" })
        );
        assert_eq!(
            request(40.73, f64::INFINITY, None).validate(),
            Err(RequestError::NotFinite { field: "lon" })
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            RequestError::LimitOutOfRange(0).to_string(),
            "limit must be an integer between 1 and 50, got 0"
        );
        assert_eq!(
            RequestError::NotFinite { field: "lat" }.to_string(),
            "lat must be a finite number"
        );
    }

    #[test]
    fn deserializes_without_limit() {
        let req: NearestRequest = serde_json::from_value(json!({ "lat": 40.73, "lon": -73.99 })).unwrap();
        assert_eq!(req, request(40.73, -73.99, None));
    }

    #[test]
    fn fractional_limit_is_rejected() {
        let result: Result<NearestRequest, _> =
            serde_json::from_value(json!({ "lat": 40.73, "lon": -73.99, "limit": 2.5 }));
        assert!(result.is_err());
    }

    #[test]
    fn whole_float_limit_is_an_integer() {
        let req: NearestRequest =
            serde_json::from_value(json!({ "lat": 40.73, "lon": -73.99, "limit": 3.0 })).unwrap();
        assert_eq!(req.limit, Some(3));

        let req: NearestRequest =
            serde_json::from_value(json!({ "lat": 40.73, "lon": -73.99, "limit": null })).unwrap();
        assert_eq!(req.limit, None);
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        let result: Result<NearestRequest, _> =
            serde_json::from_value(json!({ "lat": 40.73, "lon": -73.99, "limit": "many" }));
        assert!(result.is_err());
        let result: Result<NearestRequest, _> =
            serde_json::from_value(json!({ "lat": 40.73, "lon": -73.99, "limit": true }));
        assert!(result.is_err());
    }

    #[test]
    fn echoes_default_limit() {
        let q = request(40.73, -73.99, None).validate().unwrap();
        let response = NearestResponse::new(q, Vec::new());
        let json: serde_json::Value =
            serde_json::from_str(&response.to_pretty_json().unwrap()).unwrap();

        assert_eq!(
            json,
            json!({ "query": { "lat": 40.73, "lon": -73.99, "limit": 5 }, "stations": [] })
        );
    }

    #[test]
    fn schema_describes_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(NearestRequest)).unwrap();
        let props = &schema["properties"];
        assert_eq!(props["lat"]["description"], "Latitude in decimal degrees");
        assert_eq!(props["lon"]["description"], "Longitude in decimal degrees");
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("lat")));
        assert!(!required.contains(&json!("limit")));
    }
}
