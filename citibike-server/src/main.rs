use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::info;
use tracing_subscriber::EnvFilter;

use citibike_server::config::{ServerConfig, Transport};
use citibike_server::feed::FeedClient;
use citibike_server::tool::NearestCitibikes;
use citibike_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the MCP stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ServerConfig::from_env()?;
    let feeds = FeedClient::new(config.feeds)?;
    info!(
        status_url = feeds.status_url(),
        information_url = feeds.information_url(),
        "feed client ready"
    );

    match config.transport {
        Transport::Http(addr) => {
            let app = create_router(AppState::new(feeds));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Citi Bike nearest-station server listening on http://{addr}");
            info!("  GET /health");
            info!("  GET /nearest?lat=..&lon=..&limit=..");
            axum::serve(listener, app).await?;
        }
        Transport::Stdio => {
            info!("serving nearest_citibikes over MCP stdio");
            let service = NearestCitibikes::new(feeds).serve(stdio()).await?;
            let reason = service.waiting().await?;
            info!(?reason, "MCP server stopped");
        }
    }

    Ok(())
}
