//! Pre-DTCT form service entry point.

mod config;
mod db;
mod excel;
mod glossary;
mod server;
mod timetable;
mod types;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::db::FormsDbManager;
use crate::glossary::GlossaryStore;
use crate::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();
    config.ensure_directories()?;

    let forms_db = FormsDbManager::new(&config.database_path.display().to_string());

    let glossary = GlossaryStore::load_from_directory(&config.glossary_dir);
    if glossary.is_empty() {
        warn!(
            "No glossary entries loaded from {}; dropdowns will be empty",
            config.glossary_dir.display()
        );
    } else {
        info!("Glossary cache populated with {} entries", glossary.len());
    }

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, forms_db, glossary));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Pre-DTCT form service listening on {bind_addr}");

    axum::serve(listener, server::create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
