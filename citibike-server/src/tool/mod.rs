//! The `nearest_citibikes` tool.
//!
//! [`NearestRequest`] is validated before anything touches the network,
//! then both feeds are fetched and ranked. [`NearestCitibikes`] serves the
//! tool over MCP; the HTTP layer in `web` reuses the same request and
//! response types.

mod request;
mod server;

pub use request::{
    EchoedQuery, NearestRequest, NearestResponse, RequestError, ValidatedQuery, respond,
};
pub use server::{NearestCitibikes, SERVER_NAME, SERVER_VERSION};
