use reqwest::Method;

use super::NewsApi;
use crate::errors::{AppError, AppResult};
use crate::models::{FeedHealth, NewRssFeed, RssFeed};
use crate::validation;

impl NewsApi {
    /// GET /api/rss-feeds. Empty without a backend.
    pub async fn get_rss_feeds(&self) -> AppResult<Vec<RssFeed>> {
        if !self.is_configured() {
            return Ok(Vec::new());
        }
        self.get_json(&["api", "rss-feeds"], "Failed to fetch feeds").await
    }

    /// POST /api/rss-feeds
    pub async fn add_rss_feed(&self, feed: &NewRssFeed) -> AppResult<RssFeed> {
        feed.validate()?;
        if !self.is_configured() {
            return Err(AppError::BackendNotConfigured);
        }
        let body = NewRssFeed {
            name: feed.name.trim().to_string(),
            url: feed.url.trim().to_string(),
            category: feed.category,
        };
        self.send_json(Method::POST, &["api", "rss-feeds"], &body, "Failed to add feed")
            .await
    }

    /// DELETE /api/rss-feeds/{id}
    pub async fn delete_rss_feed(&self, id: &str) -> AppResult<()> {
        validation::require("id", id)?;
        self.send_empty(
            Method::DELETE,
            &["api", "rss-feeds", id],
            "Failed to delete feed",
        )
        .await
    }

    /// GET /api/rss-feeds/health: per-feed ok/error. Empty without a backend.
    pub async fn check_rss_health(&self) -> AppResult<FeedHealth> {
        if !self.is_configured() {
            return Ok(FeedHealth::new());
        }
        self.get_json(&["api", "rss-feeds", "health"], "Failed to check health")
            .await
    }
}
