pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod views;

use std::sync::Arc;

use anyhow::Result;
use lectura_common::{ModelSet, Settings};
use tokio::net::TcpListener;

pub use routes::create_router;
pub use state::AppState;

pub async fn serve(settings: &Settings, models: Arc<ModelSet>) -> Result<()> {
    let app = create_router(AppState::new(settings, models));
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "Listening");
    axum::serve(listener, app).await?;
    Ok(())
}
