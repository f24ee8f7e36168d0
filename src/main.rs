use std::{process, sync::Arc};

use notes_backend::{NoteStore, app, config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        process::exit(1);
    });

    // Store creation, schema is created here for the persistent backend
    let store = NoteStore::open(cfg.storage_location())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to open note store: {e}");
            process::exit(1);
        });

    let router = app::router(Arc::new(store));

    let listener = tokio::net::TcpListener::bind(cfg.bind_address())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {}: {e}", cfg.bind_address());
            process::exit(1);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("REST server starting, listening on {}", addr),
        Err(e) => tracing::warn!("Could not read listener address: {e}"),
    }

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        process::exit(1);
    }
}
