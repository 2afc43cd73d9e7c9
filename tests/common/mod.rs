// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use runlog_tracker::config::Config;
use runlog_tracker::routes::create_router;
use runlog_tracker::services::{ArticleService, ReportService};
use runlog_tracker::store::FlatFileStore;
use runlog_tracker::AppState;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a test app over a temporary data directory.
/// Returns the router, the shared state, and the guard keeping the
/// directory alive for the test's duration.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Config::test_default(dir.path().to_path_buf());

    let store = FlatFileStore::open(&config.data_dir).expect("Failed to open test store");
    let report_service = ReportService::new(&config.reports_dir);
    let article_service = ArticleService::new(config.articles_url.clone());

    let state = Arc::new(AppState {
        config,
        store,
        report_service,
        article_service,
    });

    (create_router(state.clone()), state, dir)
}

/// Create a session token the way the login route does.
#[allow(dead_code)]
pub fn create_test_jwt(username: &str, signing_key: &[u8]) -> String {
    runlog_tracker::middleware::auth::create_jwt(username, signing_key)
        .expect("Failed to create test JWT")
}
