mod bootstrap;
mod catalog;
mod chat;
mod estimate;
mod health;

use anyhow::Result;
use axum::Router;
use ratecard_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use ratecard_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config)?;
    let router = build_router(&app);

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        rate_card_version = app.engine.rate_card().version,
        "ratecard-server started"
    );

    axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown()).await?;

    tracing::info!(
        event_name = "system.server.stopped",
        correlation_id = "shutdown",
        "ratecard-server stopped"
    );

    Ok(())
}

fn build_router(app: &bootstrap::Application) -> Router {
    Router::new()
        .merge(health::router(health::HealthState::from_config(&app.config)))
        .merge(chat::router(chat::ChatState::from_config(&app.config)))
        .merge(estimate::router(estimate::EstimateState::new(
            app.engine.clone(),
            app.templates.clone(),
        )))
        .merge(catalog::router(app.engine.rate_card().clone()))
}

async fn wait_for_shutdown() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            event_name = "system.server.shutdown_signal_error",
            correlation_id = "shutdown",
            error = %error,
            "failed to listen for shutdown signal"
        );
    }
}
