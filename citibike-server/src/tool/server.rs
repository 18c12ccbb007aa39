//! MCP server exposing `nearest_citibikes`.

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tracing::{info, warn};

use super::request::{NearestRequest, respond};
use crate::feed::FeedClient;

/// Name advertised during the MCP handshake.
pub const SERVER_NAME: &str = "CitiBike Nearest";

/// Version advertised during the MCP handshake.
pub const SERVER_VERSION: &str = "0.1.0";

/// MCP service with a single tool.
#[derive(Clone)]
pub struct NearestCitibikes {
    feeds: FeedClient,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl NearestCitibikes {
    pub fn new(feeds: FeedClient) -> Self {
        Self {
            feeds,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "nearest_citibikes",
        description = "Return nearest Citi Bike stations for a lat/lon with distance and ebike/classic availability.",
        annotations(title = "Nearest Citi Bikes", read_only_hint = true)
    )]
    async fn nearest_citibikes(
        &self,
        Parameters(request): Parameters<NearestRequest>,
    ) -> Result<CallToolResult, McpError> {
        let query = request
            .validate()
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        info!(lat = request.lat, lon = request.lon, limit = ?request.limit, "nearest_citibikes");

        let response = match respond(&self.feeds, query).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "nearest_citibikes failed");
                return Ok(CallToolResult::error(vec![Content::text(e.to_string())]));
            }
        };

        let text = response
            .to_pretty_json()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for NearestCitibikes {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
                ..Implementation::default()
            },
            instructions: Some(
                "Call nearest_citibikes with a latitude and longitude to list the closest \
                 Citi Bike stations with live bike and dock availability."
                    .to_string(),
            ),
            ..ServerInfo::default()
        }
    }
}
