use omen::config::Config;
use omen::services::{StatusBoard, Watcher};
use omen::{api, AppState};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "omen=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Omen server on {}:{}", config.host, config.port);

    // Shared status board for the watcher task and the HTTP handlers
    let status = Arc::new(StatusBoard::new());

    // Start the reversal watcher
    let watcher = Watcher::new(config.clone(), status.clone());
    tokio::spawn(watcher.run());

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let state = AppState {
        config: config.clone(),
        status,
    };
    let app = api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the keep-alive server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Omen server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
