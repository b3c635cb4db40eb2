//! Serves the sentence editor over HTTP.
//!
//! Settings come from `dsl_sentence.toml` (or the file named by
//! `DSL_SENTENCE_CONFIG`) and `DSL_SENTENCE__*` environment variables.
//! `RUST_LOG` overrides the configured log filter.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dsl_sentence::server::{SharedResolver, router};
use dsl_sentence::settings::{DEFAULT_PATH, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::var("DSL_SENTENCE_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
    let settings = Settings::load(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let enumerations = settings.resolver();
    if enumerations.is_empty() {
        warn!(config = %path, "no enumerations configured, drop downs will be empty");
    }
    info!(config = %path, enumerations = enumerations.len(), "settings loaded");
    let resolver: SharedResolver = Arc::new(enumerations);

    let listener = tokio::net::TcpListener::bind(&settings.listen).await?;
    info!(listen = %settings.listen, "serving");
    axum::serve(listener, router(resolver)).await?;
    Ok(())
}
