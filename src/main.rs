use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use collegefinder_api::api::{create_router, AppState};
use collegefinder_api::config::Config;
use collegefinder_api::services::providers::GeminiProvider;
use collegefinder_api::store::{FileBackend, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let store = Store::new(Arc::new(FileBackend::new(&config.data_dir)));
    let ai = Arc::new(GeminiProvider::new(
        config.gemini_api_key.clone(),
        config.gemini_api_url.clone(),
    ));

    let app = create_router(AppState::new(store, ai));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Server running on http://{}:{}", config.host, config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
