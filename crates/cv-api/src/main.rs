//! Claim Verifier API Server

mod config;
mod pipeline;
mod routes;

use config::AppConfig;
use pipeline::{ClaimPipeline, RagPipeline};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers
pub struct AppState {
    pub pipeline: Box<dyn ClaimPipeline>,
    pub config: AppConfig,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cv_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Claim Verifier API Server");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let pipeline = match RagPipeline::build(&config.pipeline).await {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("Failed to build verification pipeline: {}", e);
            std::process::exit(1);
        }
    };

    info!("Verification pipeline ready");

    let bind_addr = config.bind_addr;
    let state = Arc::new(AppState {
        pipeline: Box::new(pipeline),
        config,
    });

    let app = routes::router(state);

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    info!("Listening on {}", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
