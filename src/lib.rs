// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RunLog-Tracker: personal running workout tracker.
//!
//! This crate provides the backend API for recording running sessions,
//! computing date-filtered statistics, rendering PDF performance
//! reports, and fetching a scraped article feed.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::{ArticleService, ReportService};
use store::FlatFileStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: FlatFileStore,
    pub report_service: ReportService,
    pub article_service: ArticleService,
}
