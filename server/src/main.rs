use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use devevent_server::config::Config;
use devevent_server::database::connect_to_database;
use devevent_server::routes::create_routes;
use devevent_server::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if !config.analytics.is_enabled() && cfg!(debug_assertions) {
        tracing::warn!("PostHog not initialized. Check if NEXT_PUBLIC_POSTHOG_KEY is set in .env");
    }

    let db = connect_to_database(config.database.clone())
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    let state = AppState::new(db, config.analytics.clone());
    let app: Router = create_routes(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::warn!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::warn!("Received SIGTERM, shutting down");
        }
    }
}
