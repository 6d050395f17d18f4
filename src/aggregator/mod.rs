//! Client-side RSS aggregation, used when the backend cannot serve the live feed
//! or search.
//!
//! Feeds are fetched concurrently, each parsed with `feed-rs`, flattened into
//! [`LiveArticle`]s, then merged: newest first, capped per source.

pub mod extract;
pub mod merge;

use std::time::Instant;

use futures_util::future::join_all;
use reqwest::Client;

use self::extract::FetchedFeed;
use crate::config::AggregatorConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{map_category, ArticleList, Category, LiveArticle, RssFeed};
use crate::observability;

const FEED_ACCEPT: &str = "application/rss+xml, application/rdf+xml, application/atom+xml, application/feed+json, application/xml;q=0.9, text/xml;q=0.8";

pub struct FeedAggregator {
    http: Client,
    config: AggregatorConfig,
}

impl FeedAggregator {
    pub fn new(http: Client, config: AggregatorConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Feed URLs to read for `category`.
    ///
    /// Backend sources whose category matches either the raw or the mapped name win;
    /// otherwise the built-in list for the category, or for `World`.
    pub fn select_feeds(&self, category: &str, backend_feeds: &[RssFeed]) -> Vec<String> {
        let mapped = map_category(Some(category));
        let mut urls: Vec<String> = backend_feeds
            .iter()
            .filter(|f| f.category == mapped || f.category == category)
            .map(|f| f.url.clone())
            .collect();

        if urls.is_empty() {
            urls = self.builtin_feeds(&mapped).to_vec();
        }
        urls.truncate(self.config.max_feeds);
        urls
    }

    fn builtin_feeds(&self, category: &str) -> &[String] {
        let defaults = &self.config.default_feeds;
        category
            .parse::<Category>()
            .ok()
            .and_then(|c| defaults.get(&c))
            .or_else(|| defaults.get(&Category::World))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Live feed for one category built from RSS directly.
    pub async fn live_feed(&self, category: &str, backend_feeds: &[RssFeed]) -> ArticleList {
        let mapped = map_category(Some(category));
        if mapped == Category::Originals.as_str() {
            return ArticleList::default();
        }

        let urls = self.select_feeds(category, backend_feeds);
        log::info!("Client-side live feed for {} from {} feeds", mapped, urls.len());

        let fetched = self.fetch_all(&urls).await;
        let articles: Vec<LiveArticle> = fetched
            .iter()
            .flat_map(|f| f.articles(&mapped, self.config.summary_chars))
            .collect();

        ArticleList {
            articles: merge::merge(articles, self.config.per_source_limit),
        }
    }

    /// Keyword search over the built-in feeds of the search categories.
    pub async fn search(&self, query: &str) -> ArticleList {
        let needle = query.to_lowercase();
        if needle.trim().is_empty() {
            return ArticleList::default();
        }

        let per_category = self.config.search_categories.iter().map(|category| {
            let urls: Vec<String> = self
                .config
                .default_feeds
                .get(category)
                .map(|urls| {
                    urls.iter()
                        .take(self.config.search_feeds_per_category)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            let needle = needle.as_str();
            async move {
                let fetched = self.fetch_all(&urls).await;
                fetched
                    .iter()
                    .flat_map(|feed| {
                        feed.feed
                            .entries
                            .iter()
                            .filter(move |entry| merge::entry_matches(entry, needle))
                            .map(move |entry| {
                                extract::to_article(
                                    entry,
                                    feed,
                                    category.as_str(),
                                    self.config.summary_chars,
                                )
                            })
                    })
                    .collect::<Vec<_>>()
            }
        });

        let articles = join_all(per_category).await.into_iter().flatten().collect();
        ArticleList { articles }
    }

    /// Fetches every URL concurrently. Failures are logged and dropped.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<FetchedFeed> {
        let results = join_all(urls.iter().map(|url| self.fetch_feed(url))).await;
        results
            .into_iter()
            .zip(urls)
            .filter_map(|(result, url)| match result {
                Ok(feed) => Some(feed),
                Err(e) => {
                    log::warn!("Skipping feed {}: {}", url, e);
                    None
                }
            })
            .collect()
    }

    pub async fn fetch_feed(&self, url: &str) -> AppResult<FetchedFeed> {
        let started = Instant::now();
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, FEED_ACCEPT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Backend {
                status: response.status().as_u16(),
                message: format!("Feed request failed for {url}"),
            });
        }

        let body = response.bytes().await?;
        let feed = feed_rs::parser::parse(&body[..])?;
        observability::log_feed_processing(url, feed.entries.len(), started);

        Ok(FetchedFeed {
            url: url.to_string(),
            feed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(id: &str, category: &str, url: &str) -> RssFeed {
        RssFeed {
            id: id.to_string(),
            name: format!("feed {id}"),
            url: url.to_string(),
            category: category.to_string(),
        }
    }

    fn aggregator() -> FeedAggregator {
        FeedAggregator::new(Client::new(), AggregatorConfig::default())
    }

    #[test]
    fn test_select_feeds_matches_raw_and_mapped_category() {
        let backend = vec![
            feed("1", "Technology", "https://a.example/rss"),
            feed("2", "Tech", "https://b.example/rss"),
            feed("3", "World", "https://c.example/rss"),
        ];
        let urls = aggregator().select_feeds("Tech", &backend);
        assert_eq!(urls, vec!["https://a.example/rss", "https://b.example/rss"]);
    }

    #[test]
    fn test_select_feeds_caps_at_max() {
        let backend: Vec<RssFeed> = (0..6)
            .map(|i| feed(&i.to_string(), "India", &format!("https://in{i}.example/rss")))
            .collect();
        assert_eq!(aggregator().select_feeds("India", &backend).len(), 4);
    }

    #[test]
    fn test_select_feeds_falls_back_to_builtin_world() {
        let urls = aggregator().select_feeds("Sports", &[]);
        assert_eq!(urls, vec!["http://feeds.bbci.co.uk/news/world/rss.xml"]);

        let urls = aggregator().select_feeds("Gardening", &[]);
        assert_eq!(urls, vec!["http://feeds.bbci.co.uk/news/world/rss.xml"]);
    }

    #[tokio::test]
    async fn test_originals_has_no_live_feed() {
        let list = aggregator().live_feed("Originals", &[]).await;
        assert!(list.articles.is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_returns_nothing() {
        let list = aggregator().search("   ").await;
        assert!(list.articles.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_drops_unreachable_feeds() {
        let fetched = aggregator()
            .fetch_all(&["http://127.0.0.1:9/unreachable.xml".to_string()])
            .await;
        assert!(fetched.is_empty());
    }
}
