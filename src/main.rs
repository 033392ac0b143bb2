use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use vibe2code_landing::{config::Config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vibe2code_landing=info".parse()?),
        )
        .init();

    info!("Starting landing page server");

    // Load configuration from environment
    let config = Config::from_env()?;
    let port = config.port;
    info!("Serving landing page for @{}", config.github_user);

    let state = Arc::new(server::AppState::new(config));

    // Initial fetch-render cycle; early requests see placeholder cards
    let startup_state = Arc::clone(&state);
    tokio::spawn(async move { server::refresh(&startup_state).await });

    let app = server::router(state);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
