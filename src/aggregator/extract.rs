use feed_rs::model::{Entry, Feed};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::LiveArticle;

pub const UNKNOWN_SOURCE: &str = "Unknown";

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").expect("valid tag regex"));
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// A successfully fetched and parsed feed.
#[derive(Debug)]
pub struct FetchedFeed {
    pub url: String,
    pub feed: Feed,
}

impl FetchedFeed {
    pub fn title(&self) -> Option<&str> {
        self.feed
            .title
            .as_ref()
            .map(|t| t.content.trim())
            .filter(|t| !t.is_empty())
    }

    pub fn source_name(&self) -> String {
        self.title().unwrap_or(UNKNOWN_SOURCE).to_string()
    }

    pub fn articles(&self, category: &str, summary_chars: usize) -> Vec<LiveArticle> {
        self.feed
            .entries
            .iter()
            .map(|entry| to_article(entry, self, category, summary_chars))
            .collect()
    }
}

/// Raw description of an entry: summary first, then body content.
pub fn entry_description(entry: &Entry) -> Option<&str> {
    entry
        .summary
        .as_ref()
        .map(|s| s.content.as_str())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.as_deref()))
}

pub fn to_article(
    entry: &Entry,
    feed: &FetchedFeed,
    category: &str,
    summary_chars: usize,
) -> LiveArticle {
    let description = entry_description(entry);
    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.clone())
        .or_else(|| description.map(strip_html))
        .or_else(|| feed.title().map(str::to_string))
        .unwrap_or_else(|| "Untitled".to_string());

    LiveArticle {
        title,
        summary: summarize(description, summary_chars),
        link: entry.links.first().map(|l| l.href.clone()),
        published_at: entry.published.or(entry.updated),
        source: Some(feed.source_name()),
        category: Some(category.to_string()),
        image_url: image_url(entry),
    }
}

/// Removes markup, decodes entities and collapses whitespace.
pub fn strip_html(raw: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(raw, "");
    let decoded = html_escape::decode_html_entities(&without_tags);
    WHITESPACE_REGEX.replace_all(decoded.trim(), " ").into_owned()
}

/// One summary line: the first `max_chars` characters of the plain text, then "...".
pub fn summarize(description: Option<&str>, max_chars: usize) -> Vec<String> {
    let text = match description.map(strip_html) {
        Some(text) if !text.is_empty() => text,
        _ => return Vec::new(),
    };
    let truncated: String = text.chars().take(max_chars).collect();
    vec![format!("{truncated}...")]
}

fn image_url(entry: &Entry) -> Option<String> {
    entry
        .media
        .iter()
        .flat_map(|m| m.thumbnails.iter())
        .map(|t| t.image.uri.clone())
        .next()
        .or_else(|| {
            entry
                .media
                .iter()
                .flat_map(|m| m.content.iter())
                .find_map(|c| c.url.as_ref().map(|u| u.to_string()))
        })
}
