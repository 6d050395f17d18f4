use reqwest::Method;
use serde_json::Value;

use super::NewsApi;
use crate::errors::{AppError, AppResult};
use crate::models::article::SearchRequest;
use crate::models::news::GenerateRequest;
use crate::models::{map_category, ArticleList, GeneratedContent, NewsDraft, NewsItem};
use crate::validation;

impl NewsApi {
    /// GET /api/news. Empty without a backend.
    pub async fn get_all_news(&self) -> AppResult<Vec<NewsItem>> {
        if !self.is_configured() {
            return Ok(Vec::new());
        }
        self.get_json(&["api", "news"], "Failed to fetch news").await
    }

    /// Looks an article up in the full listing; the backend has no single-item read.
    pub async fn find_news(&self, id: &str) -> AppResult<NewsItem> {
        self.get_all_news()
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::resource_not_found("Article"))
    }

    /// POST /api/news with a validated draft.
    pub async fn publish_news(&self, draft: &NewsDraft) -> AppResult<Value> {
        let payload = draft.prepared()?;
        self.send_json(Method::POST, &["api", "news"], &payload, "Failed to publish")
            .await
    }

    /// PUT /api/news/{id} with the full draft.
    pub async fn update_news(&self, id: &str, draft: &NewsDraft) -> AppResult<Value> {
        validation::require("id", id)?;
        let payload = draft.prepared()?;
        self.send_json(
            Method::PUT,
            &["api", "news", id],
            &payload,
            "Failed to update news",
        )
        .await
    }

    /// DELETE /api/news/{id}
    pub async fn delete_news(&self, id: &str) -> AppResult<()> {
        validation::require("id", id)?;
        self.send_empty(Method::DELETE, &["api", "news", id], "Failed to delete news")
            .await
    }

    /// POST /api/generate. Never fails: without a backend, or when the backend
    /// errors, a placeholder draft explains why.
    pub async fn generate_content(&self, prompt: &str) -> AppResult<GeneratedContent> {
        validation::require("prompt", prompt)?;
        if !self.is_configured() {
            return Ok(GeneratedContent::placeholder(
                "AI Only Available with Backend",
                "Please connect to the backend.",
                "System",
                "Preview",
            ));
        }

        let result: AppResult<GeneratedContent> = self
            .send_json(
                Method::POST,
                &["api", "generate"],
                &GenerateRequest { prompt },
                "Backend request failed",
            )
            .await;
        match result {
            Ok(generated) => Ok(generated),
            Err(e) => {
                log::warn!("AI generation failed: {}", e);
                Ok(GeneratedContent::placeholder(
                    "AI Offline",
                    "Backend unavailable.",
                    "World",
                    "Error",
                ))
            }
        }
    }

    /// POST /api/search, falling back to searching RSS client-side.
    pub async fn search_news(&self, query: &str) -> AppResult<ArticleList> {
        validation::require("query", query)?;
        if self.is_configured() {
            let result: AppResult<ArticleList> = self
                .send_json(
                    Method::POST,
                    &["api", "search"],
                    &SearchRequest { query },
                    "Search request failed",
                )
                .await;
            match result {
                Ok(list) => return Ok(list),
                Err(e) => log::warn!("Backend search unavailable, searching client-side: {}", e),
            }
        }
        Ok(self.aggregator().search(query).await)
    }

    /// GET /api/live-feed?category=..., falling back to client-side aggregation.
    pub async fn get_live_feed(&self, category: Option<&str>) -> AppResult<ArticleList> {
        let mapped = map_category(category);

        if self.is_configured() {
            match self.backend_live_feed(&mapped).await {
                Ok(list) => return Ok(list),
                Err(e) => log::warn!("Backend unavailable, using client-side fallback: {}", e),
            }
        }

        let backend_feeds = if self.is_configured() {
            match self.get_rss_feeds().await {
                Ok(feeds) => feeds,
                Err(e) => {
                    log::warn!("Failed to fetch dynamic feeds for client-side fallback: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Ok(self
            .aggregator()
            .live_feed(category.unwrap_or_default(), &backend_feeds)
            .await)
    }

    async fn backend_live_feed(&self, category: &str) -> AppResult<ArticleList> {
        let mut url = self.endpoint(&["api", "live-feed"])?;
        url.query_pairs_mut().append_pair("category", category);
        let response = self
            .execute(
                self.request(Method::GET, url),
                "Backend feed request failed",
            )
            .await?;
        Ok(response.json().await?)
    }
}
