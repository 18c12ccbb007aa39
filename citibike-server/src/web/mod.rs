//! HTTP mirror of the tool.
//!
//! `GET /nearest?lat=..&lon=..&limit=..` returns the same payload as the
//! MCP tool, for callers that speak plain HTTP.

mod routes;
mod state;

pub use routes::{ErrorResponse, create_router};
pub use state::AppState;
