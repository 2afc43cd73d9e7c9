// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{compute_statistics, filter_records, SessionRecord, Statistics};
use crate::services::{Article, ReportService};
use crate::AppState;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/sessions", get(get_sessions).post(create_session))
        .route("/api/stats", get(get_stats))
        .route("/api/report", get(get_report))
        .route("/api/articles", get(get_articles))
}

// ─── User Profile ────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub username: String,
}

/// Get current session's username.
async fn get_me(Extension(user): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        username: user.username,
    })
}

// ─── Session Records ─────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionRecord>,
    pub total: u32,
}

/// Get the user's full record sequence, in insertion order.
///
/// This is the data source for the frontend's time-series charts.
async fn get_sessions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SessionsResponse>> {
    let sessions = state.store.load_records(&user.username)?;
    let total = sessions.len() as u32;

    Ok(Json(SessionsResponse { sessions, total }))
}

#[derive(Deserialize)]
pub struct NewSessionRequest {
    pub date: NaiveDate,
    pub distance_km: f64,
    pub time_min: f64,
    pub calories: f64,
    pub avg_heart_rate_bpm: u32,
}

#[derive(Serialize)]
pub struct NewSessionResponse {
    pub total: u32,
    pub message: String,
}

/// Append one session record to the user's partition.
async fn create_session(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>> {
    let record = SessionRecord {
        date: payload.date,
        distance_km: payload.distance_km,
        time_min: payload.time_min,
        calories: payload.calories,
        avg_heart_rate_bpm: payload.avg_heart_rate_bpm,
    };

    state.store.append_record(&user.username, record)?;
    let total = state.store.load_records(&user.username)?.len() as u32;

    Ok(Json(NewSessionResponse {
        total,
        message: "Session recorded".to_string(),
    }))
}

// ─── Statistics ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RangeQuery {
    /// Inclusive lower bound; defaults to the earliest record date
    start_date: Option<NaiveDate>,
    /// Inclusive upper bound; defaults to the latest record date
    end_date: Option<NaiveDate>,
}

/// Resolve absent bounds to the record set's min/max dates, mirroring
/// the date pickers of the original UI.
fn resolve_range(
    records: &[SessionRecord],
    query: &RangeQuery,
) -> Option<(NaiveDate, NaiveDate)> {
    let start = query
        .start_date
        .or_else(|| records.iter().map(|r| r.date).min())?;
    let end = query
        .end_date
        .or_else(|| records.iter().map(|r| r.date).max())?;
    Some((start, end))
}

#[derive(Serialize)]
pub struct StatsResponse {
    /// `None` means no records in the selected range ("no data", not an
    /// error)
    pub statistics: Option<Statistics>,
    pub record_count: u32,
}

/// Compute statistics over an inclusive date range.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<StatsResponse>> {
    let records = state.store.load_records(&user.username)?;

    let Some((start, end)) = resolve_range(&records, &query) else {
        return Ok(Json(StatsResponse {
            statistics: None,
            record_count: 0,
        }));
    };

    let filtered = filter_records(&records, start, end);
    let statistics = compute_statistics(&records, start, end);

    tracing::debug!(
        username = %user.username,
        start = %start,
        end = %end,
        record_count = filtered.len(),
        "Computed statistics"
    );

    Ok(Json(StatsResponse {
        statistics,
        record_count: filtered.len() as u32,
    }))
}

// ─── Report ──────────────────────────────────────────────────

/// Render the PDF performance report for a date range and offer it as
/// a download.
///
/// An empty filtered set is a user-visible warning (422), not a crash.
async fn get_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<RangeQuery>,
) -> Result<Response> {
    let records = state.store.load_records(&user.username)?;

    let Some((start, end)) = resolve_range(&records, &query) else {
        return Err(AppError::EmptyDataset);
    };

    let filtered = filter_records(&records, start, end);
    let statistics = compute_statistics(&records, start, end).ok_or(AppError::EmptyDataset)?;

    let bytes = state
        .report_service
        .render(&statistics, &filtered, &user.username)?;
    state
        .report_service
        .render_to_file(&statistics, &filtered, &user.username)?;

    let filename = ReportService::artifact_name(&user.username);
    tracing::info!(
        username = %user.username,
        records = filtered.len(),
        bytes = bytes.len(),
        "Rendered performance report"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

// ─── Articles ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

/// Fetch the scraped article feed.
async fn get_articles(State(state): State<Arc<AppState>>) -> Result<Json<ArticlesResponse>> {
    let articles = state.article_service.fetch_articles().await?;
    Ok(Json(ArticlesResponse { articles }))
}
