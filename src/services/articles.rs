// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Article feed fetcher.
//!
//! Fetches one HTML page and extracts (title, link, image) triples by
//! structural pattern matching on the markup. The CSS selectors are
//! tied to the source site's current markup; a schema change there
//! silently yields empty output, which callers must tolerate. All of
//! that fragility stays behind this one interface.

use scraper::{Html, Selector};
use serde::Serialize;

/// One extracted article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub image_url: String,
}

/// Fetches and parses the article feed page.
#[derive(Clone)]
pub struct ArticleService {
    http: reqwest::Client,
    source_url: String,
    title_selector: String,
    link_selector: String,
    image_selector: String,
}

impl ArticleService {
    /// Create a service with the default selectors for the feed page.
    pub fn new(source_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            source_url,
            title_selector: "span.css-1hc7p2m.e10ip9lg5".to_string(),
            link_selector: "a.ee4ms352.css-mg2r4i.e1c1bym14".to_string(),
            image_selector: "img.css-0.e1g79fud0".to_string(),
        }
    }

    /// Override the CSS selectors (for tests or when the source markup
    /// changes).
    pub fn with_selectors(
        mut self,
        title_selector: &str,
        link_selector: &str,
        image_selector: &str,
    ) -> Self {
        self.title_selector = title_selector.to_string();
        self.link_selector = link_selector.to_string();
        self.image_selector = image_selector.to_string();
        self
    }

    /// Fetch the source page and extract the article list.
    ///
    /// Network and HTTP failures surface as typed errors; empty or
    /// partial extraction is a normal `Ok` result.
    pub async fn fetch_articles(&self) -> Result<Vec<Article>, FeedError> {
        let response = self
            .http
            .get(&self.source_url)
            .send()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;

        let articles = self.extract(&body)?;
        tracing::info!(count = articles.len(), "Extracted articles from feed");
        Ok(articles)
    }

    /// Extract aligned title/link/image lists from the page and zip
    /// them positionally.
    ///
    /// The three lists can disagree in length when the markup shifts;
    /// zipping truncates to the shortest list so every returned entry
    /// is fully formed.
    fn extract(&self, html: &str) -> Result<Vec<Article>, FeedError> {
        let title_sel = parse_selector(&self.title_selector)?;
        let link_sel = parse_selector(&self.link_selector)?;
        let image_sel = parse_selector(&self.image_selector)?;

        let document = Html::parse_document(html);

        let titles: Vec<String> = document
            .select(&title_sel)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect();
        let links: Vec<String> = document
            .select(&link_sel)
            .filter_map(|el| el.value().attr("href"))
            .map(|href| resolve_url(&self.source_url, href))
            .collect();
        let images: Vec<String> = document
            .select(&image_sel)
            .filter_map(|el| el.value().attr("src"))
            .map(|src| resolve_url(&self.source_url, src))
            .collect();

        Ok(titles
            .into_iter()
            .zip(links)
            .zip(images)
            .map(|((title, link), image_url)| Article {
                title,
                link,
                image_url,
            })
            .collect())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, FeedError> {
    Selector::parse(selector).map_err(|e| FeedError::Selector(e.to_string()))
}

/// Resolve a possibly-relative URL against the source origin.
///
/// Slashes are normalized on both sides so concatenation cannot produce
/// `origin//path`.
fn resolve_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Errors from feed fetching.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Request(String),

    #[error("Feed returned HTTP {0}")]
    Status(u16),

    #[error("Invalid selector: {0}")]
    Selector(String),
}

impl From<FeedError> for crate::error::AppError {
    fn from(err: FeedError) -> Self {
        crate::error::AppError::Feed(err.to_string())
    }
}
