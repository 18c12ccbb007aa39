//! Nearest Citi Bike stations.
//!
//! Serves a single tool, `nearest_citibikes`, that answers: "which bike
//! stations are closest to this point, and what can I rent there?"
//! Live status and static station information are fetched from the public
//! GBFS feeds on every call and joined by station ID.

pub mod config;
pub mod feed;
pub mod geo;
pub mod nearest;
pub mod tool;
pub mod web;

#[cfg(test)]
mod test_support;
