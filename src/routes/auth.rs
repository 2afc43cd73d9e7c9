// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and logout routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub username: String,
    pub message: String,
}

/// Create an account and provision the user's record partition.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    // Malformed input is reported distinctly from credential failures.
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest("Please fill all fields".to_string()));
    }
    if payload.password != payload.confirm_password {
        return Err(AppError::BadRequest(
            "Passwords do not match".to_string(),
        ));
    }

    state.store.register(&payload.username, &payload.password)?;

    tracing::info!(username = %payload.username, "Account created");
    Ok(Json(RegisterResponse {
        username: payload.username,
        message: "Account created".to_string(),
    }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// Verify credentials and open a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest("Please fill all fields".to_string()));
    }

    if !state.store.verify(&payload.username, &payload.password)? {
        tracing::info!(username = %payload.username, "Login rejected: bad password");
        return Err(AppError::BadCredential);
    }

    let token = create_jwt(&payload.username, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!(username = %payload.username, "Login successful");
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            username: payload.username,
        }),
    ))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Discard the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (
        jar.remove(removal),
        Json(LogoutResponse {
            message: "Logged out".to_string(),
        }),
    )
}
