//! SK Site contact form - local web server.
//!
//! Runs the contact form flow outside CloudFront:
//! - `POST /submitForm` verifies, publishes and redirects
//! - `GET /health` reports liveness
//!
//! Uses the same AWS parameters and topic as the edge function unless
//! overridden through the environment.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sksite_contact::web::{health, submit_form, AppState};
use sksite_contact::{Config, FormIntake, Services};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        aws_region = %config.aws_region,
        redirect_location = %config.redirect_location,
        verify_url = %config.verify_url,
        "config_loaded"
    );

    // Create AWS and reCAPTCHA clients
    let services = Services::from_config(&config)
        .await
        .context("Failed to create service clients")?;
    info!("service_clients_created");

    // Create application state
    let intake = FormIntake::new(&config, services);
    let state = AppState::new(intake);

    // Build the router
    let app = Router::new()
        .route("/health", get(health))
        .route("/submitForm", post(submit_form))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
