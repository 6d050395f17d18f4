use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::null_as_default;

/// A live-feed or search hit, from the backend or from the client-side fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveArticle {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: Vec<String>,
    #[serde(default, alias = "url")]
    pub link: Option<String>,
    #[serde(
        default,
        alias = "pubDate",
        alias = "published_at",
        deserialize_with = "lenient_datetime"
    )]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "image_url")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<LiveArticle>,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

/// Accepts RFC 3339 or RFC 2822 timestamps; anything else reads as undated.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
