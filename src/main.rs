//! Back-office rules service

use anyhow::Result;
use backoffice_rules::{http::{router, AppState}, AppConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.as_str().into())).with(tracing_subscriber::fmt::layer()).init();

    let port = config.port;
    tracing::info!(return_base_fee = config.return_base_fee, "loaded configuration");
    let app = router(AppState { config });

    tracing::info!("backoffice-rules listening on 0.0.0.0:{}", port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?, app).await?;
    Ok(())
}
