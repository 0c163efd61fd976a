//! Estate Server - REST backend for estates, trees and drone survey plans

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use estate_server::api;
use estate_server::config::Config;
use estate_server::persistence;
use estate_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    let filter = EnvFilter::from_default_env().add_directive("estate_server=debug".parse()?);
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Estate Server...");

    let state = if config.persistence_enabled() {
        let db = persistence::init_database(&config.database_path, config.database_max_connections)
            .await?;
        let state = AppState::with_database(db, config.clone());
        state.load_from_database().await?;
        state
    } else {
        tracing::warn!("ESTATE_DATABASE_PATH is empty, estates will not be persisted");
        AppState::new(config.clone())
    };
    let state = Arc::new(state);

    let app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
