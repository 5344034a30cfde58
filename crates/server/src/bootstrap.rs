use std::sync::Arc;

use ratecard_core::config::{AppConfig, ConfigError, LoadOptions};
use ratecard_core::engine::QuoteEngine;
use tera::Tera;
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub engine: QuoteEngine,
    pub templates: Arc<Tera>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("quote template failed to compile: {0}")]
    Template(#[from] tera::Error),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let engine = QuoteEngine::new(config.rate_card());
    let templates = Arc::new(load_templates()?);

    info!(
        event_name = "system.bootstrap.ready",
        correlation_id = "bootstrap",
        rate_card_version = engine.rate_card().version,
        "application bootstrap complete"
    );

    Ok(Application { config, engine, templates })
}

// Templates are compiled in so the server has no runtime directory
// dependency.
fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template("quote.html", include_str!("../templates/quote.html.tera"))?;
    Ok(tera)
}
