// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session recording, statistics and report endpoints.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;

mod common;

const MAX_BODY: usize = 4 * 1024 * 1024;

struct TestUser {
    token: String,
}

impl TestUser {
    fn get(&self, uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .body(Body::empty())
            .unwrap()
    }

    fn post(&self, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}

fn setup() -> (Router, TestUser, tempfile::TempDir) {
    let (app, state, dir) = common::create_test_app();
    state.store.register("alice", "secret").unwrap();
    let token = common::create_test_jwt("alice", &state.config.jwt_signing_key);
    (app, TestUser { token }, dir)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn session(date: &str, distance: f64, time: f64) -> serde_json::Value {
    json!({
        "date": date,
        "distance_km": distance,
        "time_min": time,
        "calories": 100.0,
        "avg_heart_rate_bpm": 150
    })
}

async fn append(app: &Router, user: &TestUser, body: serde_json::Value) -> StatusCode {
    app.clone()
        .oneshot(user.post("/api/sessions", body))
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_sessions_start_empty() {
    let (app, user, _dir) = setup();

    let response = app.oneshot(user.get("/api/sessions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["sessions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_append_and_list_sessions() {
    let (app, user, _dir) = setup();

    assert_eq!(
        append(&app, &user, session("2024-01-01", 5.0, 30.0)).await,
        StatusCode::OK
    );
    assert_eq!(
        append(&app, &user, session("2024-01-02", 10.0, 50.0)).await,
        StatusCode::OK
    );

    let response = app.oneshot(user.get("/api/sessions")).await.unwrap();
    let body = body_json(response).await;

    assert_eq!(body["total"], 2);
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions[0]["Distance (km)"], 5.0);
    assert_eq!(sessions[1]["Distance (km)"], 10.0);
}

#[tokio::test]
async fn test_append_rejects_negative_distance() {
    let (app, user, _dir) = setup();

    let status = append(&app, &user, session("2024-01-01", -1.0, 30.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was persisted.
    let response = app.oneshot(user.get("/api/sessions")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_stats_full_range_scenario() {
    let (app, user, _dir) = setup();

    append(&app, &user, session("2024-01-01", 5.0, 30.0)).await;
    append(&app, &user, session("2024-01-02", 10.0, 50.0)).await;
    append(&app, &user, session("2024-01-03", 0.0, 0.0)).await;

    let response = app
        .oneshot(user.get("/api/stats?start_date=2024-01-01&end_date=2024-01-03"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["record_count"], 3);

    let stats = &body["statistics"];
    assert_eq!(stats["total_distance_km"], 15.0);
    assert_eq!(stats["total_time_min"], 80.0);
    // 15 km over 80 minutes
    let avg_speed = stats["avg_speed_kmh"].as_f64().unwrap();
    assert!((avg_speed - 11.25).abs() < 1e-9);
}

#[tokio::test]
async fn test_stats_out_of_range_is_no_data() {
    let (app, user, _dir) = setup();
    append(&app, &user, session("2024-01-01", 5.0, 30.0)).await;

    let response = app
        .oneshot(user.get("/api/stats?start_date=2024-02-01&end_date=2024-02-28"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["statistics"].is_null());
    assert_eq!(body["record_count"], 0);
}

#[tokio::test]
async fn test_stats_defaults_to_full_record_extent() {
    let (app, user, _dir) = setup();
    append(&app, &user, session("2024-01-01", 5.0, 30.0)).await;
    append(&app, &user, session("2024-03-01", 10.0, 60.0)).await;

    let response = app.oneshot(user.get("/api/stats")).await.unwrap();
    let body = body_json(response).await;

    assert_eq!(body["record_count"], 2);
    assert_eq!(body["statistics"]["total_distance_km"], 15.0);
}

#[tokio::test]
async fn test_report_download() {
    let (app, user, dir) = setup();
    append(&app, &user, session("2024-01-01", 5.0, 30.0)).await;

    let response = app.oneshot(user.get("/api/report")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert!(response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("alice_performance_report.pdf"));

    let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    // The artifact is also written to the reports directory.
    assert!(dir
        .path()
        .join("reports")
        .join("alice_performance_report.pdf")
        .exists());
}

#[tokio::test]
async fn test_report_empty_range_is_warning_not_crash() {
    let (app, user, _dir) = setup();
    append(&app, &user, session("2024-01-01", 5.0, 30.0)).await;

    let response = app
        .oneshot(user.get("/api/report?start_date=2024-02-01&end_date=2024-02-28"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "empty_dataset");
}

#[tokio::test]
async fn test_report_without_any_records() {
    let (app, user, _dir) = setup();

    let response = app.oneshot(user.get("/api/report")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_users_cannot_see_each_others_records() {
    let (app, state, _dir) = common::create_test_app();
    state.store.register("alice", "a").unwrap();
    state.store.register("bob", "b").unwrap();

    let alice = TestUser {
        token: common::create_test_jwt("alice", &state.config.jwt_signing_key),
    };
    let bob = TestUser {
        token: common::create_test_jwt("bob", &state.config.jwt_signing_key),
    };

    append(&app, &alice, session("2024-01-01", 5.0, 30.0)).await;

    let response = app.oneshot(bob.get("/api/sessions")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
}
