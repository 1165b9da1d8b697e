//! Call-script server.
//!
//! Loads the script feed once at start-up and serves the rendered page.
//! The application is organized into the following modules:
//!
//! - `feed`: Feed source parsing and loading
//! - `render` / `templates`: Page tree and HTML shell
//! - `page`: Interaction model (fields, cards, tooltips, search)
//! - `handlers`: HTTP route handlers

use axum::{routing::get, Router};
use std::process::ExitCode;
use std::sync::Arc;
use tower_http::services::ServeDir;

use callscripts::{handlers, load_feed, AppState, FeedSource, PageConfig, ServerConfig};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("callscripts: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = FeedSource::parse(&config.feed)?;
    let records = load_feed(&source).await?;
    let state = Arc::new(AppState::new(records, PageConfig::default()));

    let mut app = Router::new()
        .route("/", get(handlers::index))
        .route("/scripts.json", get(handlers::scripts_json))
        .route("/health", get(handlers::health))
        .with_state(state);

    if let Some(dir) = &config.assets_dir {
        log::info!("Serving assets from {}", dir.display());
        app = app.nest_service("/assets", ServeDir::new(dir));
    }

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;

    log::info!("Call-script server running at http://{}", config.addr);
    log::info!("Feed: {}", config.feed);

    axum::serve(listener, app).await?;
    Ok(())
}
