use naptan::api::NaptanClient;
use naptan::cache::CachedNaptanClient;
use naptan::config::ServerConfig;
use naptan::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    // Create cached client
    let client = NaptanClient::new(config.naptan.clone())?;
    let cached = CachedNaptanClient::new(client, &config.cache);

    let app = create_router(AppState::new(cached));

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, base_url = %config.naptan.base_url, "NaPTAN server listening");
    info!("  GET /health          - Health check");
    info!("  GET /stops           - Stops as JSON, table or CSV");
    info!("  GET /stops/geojson   - Stops as GeoJSON");
    info!("  GET /map             - Stops on a map");

    axum::serve(listener, app).await?;
    Ok(())
}
