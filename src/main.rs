// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RunLog-Tracker API Server
//!
//! Records running sessions per user, computes date-filtered
//! statistics, renders PDF performance reports, and serves a scraped
//! article feed.

use runlog_tracker::{
    config::Config,
    services::{ArticleService, ReportService},
    store::FlatFileStore,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting RunLog-Tracker API");

    // Open the flat-file store (creates the credential table on first run)
    let store = FlatFileStore::open(&config.data_dir).expect("Failed to open data directory");
    tracing::info!(path = %config.data_dir.display(), "Store opened");

    let report_service = ReportService::new(&config.reports_dir);
    let article_service = ArticleService::new(config.articles_url.clone());
    tracing::info!(url = %config.articles_url, "Article feed configured");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        report_service,
        article_service,
    });

    // Build router
    let app = runlog_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("runlog_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
