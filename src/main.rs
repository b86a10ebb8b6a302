use std::net::SocketAddr;
use std::sync::Arc;

use flightmap::basemap::Basemaps;
use flightmap::config::Config;
use flightmap::server::{AppState, router};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usvg::fontdb;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flightmap=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let basemaps = Basemaps::load(&config.states, &config.countries).await;

    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    let mut usvg_options = usvg::Options::default();
    usvg_options.fontdb = Arc::new(fontdb);

    let state = AppState {
        usvg_options: Arc::new(usvg_options),
        basemaps: Arc::new(basemaps),
        default_width: config.default_width,
        default_height: config.default_height,
        max_size: config.max_size,
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
