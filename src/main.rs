use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use translator_desk::config::Config;
use translator_desk::server::{build_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "translator_desk=debug,tower_http=debug".into()),
        )
        .init();

    let (config, loaded_from) = Config::discover(&Config::default_candidates());
    match loaded_from {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No config file found, using defaults"),
    }
    info!("Translation backend at {}", config.backend.base_url);

    let addr = (config.server.host.clone(), config.server.port);
    let app_state = AppState::new(config)?;
    let app = build_app(app_state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
