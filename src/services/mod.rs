// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod articles;
pub mod report;

pub use articles::{Article, ArticleService, FeedError};
pub use report::{ReportError, ReportService};
