// ============================
// riskweb-backend-bin/src/main.rs
// ============================
//! Process bootstrap for the risk-assessment auth backend.
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use riskweb_backend_lib::{config::Settings, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    if settings.google_client_id.is_none() {
        tracing::warn!("no federated audience configured; /auth/google will refuse requests");
    }

    let cors = router::cors_layer(&settings);
    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(settings)?);
    let app = router::create_router(state).layer(cors);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
