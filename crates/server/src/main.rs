// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod handlers;

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use clap::Parser;
use procura_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::{Args, ServerConfig};
use crate::handlers::{
    handle_bid_history, handle_create_bid, handle_create_tender, handle_edit_bid,
    handle_edit_tender, handle_get_bid_status, handle_get_tender_status, handle_list_my_bids,
    handle_list_my_tenders, handle_list_published_tenders, handle_rollback_bid,
    handle_rollback_tender, handle_set_bid_status, handle_set_tender_status,
    handle_submit_decision, handle_tender_history,
};

/// Application state shared across handlers.
///
/// Every handler locks the single persistence connection for the
/// duration of one workflow call.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub persistence: Arc<Mutex<Persistence>>,
}

/// Builds the application router with all endpoints under `/api`.
fn build_router(app_state: AppState) -> Router {
    let api: Router<AppState> = Router::new()
        .route("/ping", get(|| async { "ok" }))
        .route("/tenders", get(handle_list_published_tenders))
        .route("/tenders/new", post(handle_create_tender))
        .route("/tenders/my", get(handle_list_my_tenders))
        .route(
            "/tenders/{tender_id}/status",
            get(handle_get_tender_status).put(handle_set_tender_status),
        )
        .route("/tenders/{tender_id}/edit", patch(handle_edit_tender))
        .route(
            "/tenders/{tender_id}/rollback/{version}",
            put(handle_rollback_tender),
        )
        .route("/tenders/{tender_id}/versions", get(handle_tender_history))
        .route("/bids/new", post(handle_create_bid))
        .route("/bids/my", get(handle_list_my_bids))
        .route(
            "/bids/{bid_id}/status",
            get(handle_get_bid_status).put(handle_set_bid_status),
        )
        .route(
            "/bids/{bid_id}/edit",
            patch(handle_edit_bid).post(handle_edit_bid),
        )
        .route("/bids/{bid_id}/rollback/{version}", put(handle_rollback_bid))
        .route(
            "/bids/{bid_id}/submit_decision",
            put(handle_submit_decision),
        )
        .route("/bids/{bid_id}/versions", get(handle_bid_history));

    Router::new().nest("/api", api).with_state(app_state)
}

/// Opens the configured database.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated.
fn open_persistence(
    config: &ServerConfig,
) -> Result<Persistence, procura_persistence::PersistenceError> {
    config.database.as_ref().map_or_else(
        || {
            info!("Using in-memory database");
            Persistence::new_in_memory()
        },
        |path| {
            info!(path = %path.display(), "Using file-based database");
            Persistence::new_with_file(path)
        },
    )
}

/// Resolves once Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Received CTRL+C signal, shutting down gracefully");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: ServerConfig = ServerConfig::from(Args::parse());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Initializing Procura Server");

    let persistence: Persistence = open_persistence(&config)?;
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    info!(address = %config.address, "Server listening");
    let listener = tokio::net::TcpListener::bind(config.address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests;
