// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod session;
pub mod stats;
pub mod user;

pub use session::SessionRecord;
pub use stats::{compute_statistics, filter_records, Statistics};
pub use user::User;
