use std::sync::Arc;

use anyhow::Result;
use lectura_common::{ModelSet, Settings};
use tracing_subscriber::{self, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(?settings, "Starting PDF reading assistant");

    // Both models, once, before accepting requests
    let models = ModelSet::load(&settings).await.inspect_err(|e| {
        tracing::error!("Failed to load models: {e}");
    })?;

    lectura_api::serve(&settings, Arc::new(models)).await
}
