use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trip_planner::config::AppConfig;
use trip_planner::discovery::{DiscoveryClient, StaticDestinations};
use trip_planner::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trip_planner=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = match &config.mock_data {
        Some(path) => match StaticDestinations::from_file(path) {
            Ok(mock) => {
                info!(path = %path.display(), destinations = mock.len(), "serving mock destinations");
                AppState::new(mock)
            }
            Err(e) => {
                error!(path = %path.display(), "Failed to load mock data: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => match DiscoveryClient::new(config.discovery()) {
            Ok(client) => {
                info!(base_url = client.base_url(), "using discovery service");
                AppState::new(client)
            }
            Err(e) => {
                error!("Failed to create discovery client: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.listen_addr, "Failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Trip Planner listening on http://{}", config.listen_addr);
    info!("  GET  /health                   - Health check");
    info!("  GET  /                         - Search form");
    info!("  GET  /destinations             - Top destinations for a search");
    info!("  GET  /destinations/:id         - Destination detail");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
