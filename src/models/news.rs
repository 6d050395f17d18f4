use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::null_as_default;
use crate::errors::{AppError, AppResult};
use crate::validation;

pub const DEFAULT_SOURCE: &str = "Gathered Original";
pub const DRAFT_AUTHOR: &str = "Admin";

/// Fixed topic list used by the newsroom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    India,
    Originals,
    #[default]
    World,
    Sports,
    #[serde(alias = "Tech")]
    Technology,
    Education,
    Environment,
    Business,
    /// Anything the backend sends that is not in the list above.
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::India,
        Category::Originals,
        Category::World,
        Category::Sports,
        Category::Technology,
        Category::Education,
        Category::Environment,
        Category::Business,
    ];

    /// Categories an RSS source can be filed under (no `Originals`).
    pub const FEED: [Category; 7] = [
        Category::India,
        Category::World,
        Category::Technology,
        Category::Sports,
        Category::Business,
        Category::Environment,
        Category::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::India => "India",
            Category::Originals => "Originals",
            Category::World => "World",
            Category::Sports => "Sports",
            Category::Technology => "Technology",
            Category::Education => "Education",
            Category::Environment => "Environment",
            Category::Business => "Business",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("tech") {
            return Ok(Category::Technology);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                AppError::invalid_input("category", &format!("unknown category '{trimmed}'"))
            })
    }
}

/// Normalise a free-form category name the way the live feed expects it.
/// `Tech` becomes `Technology`; a missing or blank name means `World`.
pub fn map_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some("Tech") => Category::Technology.to_string(),
        Some(c) if !c.is_empty() => c.to_string(),
        _ => Category::World.to_string(),
    }
}

/// An article as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_breaking: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_ai_generated: bool,
}

impl NewsItem {
    pub fn source_or_default(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_SOURCE)
    }
}

/// Body of a publish or update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsDraft {
    pub title: String,
    pub summary: Vec<String>,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub is_breaking: bool,
    pub is_featured: bool,
    pub is_ai_generated: bool,
    pub author: String,
}

impl Default for NewsDraft {
    fn default() -> Self {
        NewsDraft {
            title: String::new(),
            summary: Vec::new(),
            content: String::new(),
            category: Category::World,
            tags: Vec::new(),
            image_url: None,
            is_breaking: false,
            is_featured: false,
            is_ai_generated: false,
            author: DRAFT_AUTHOR.to_string(),
        }
    }
}

impl From<&NewsItem> for NewsDraft {
    fn from(item: &NewsItem) -> Self {
        NewsDraft {
            title: item.title.clone(),
            summary: item.summary.clone(),
            content: item.content.clone(),
            category: item.category,
            tags: item.tags.clone(),
            image_url: item.image_url.clone(),
            is_breaking: item.is_breaking,
            is_featured: item.is_featured,
            is_ai_generated: item.is_ai_generated,
            author: DRAFT_AUTHOR.to_string(),
        }
    }
}

impl NewsDraft {
    pub fn validate(&self) -> AppResult<()> {
        validation::require("title", &self.title)?;
        validation::require("content", &self.content)?;
        if let Some(url) = self.image_url.as_deref().filter(|u| !u.is_empty()) {
            validation::validate_url(url)?;
        }
        Ok(())
    }

    /// Validated copy ready to send, with a placeholder image filled in.
    pub fn prepared(&self) -> AppResult<NewsDraft> {
        self.validate()?;
        let mut draft = self.clone();
        if draft.image_url.as_deref().map_or(true, str::is_empty) {
            draft.image_url = Some(placeholder_image_url());
        }
        draft.author = DRAFT_AUTHOR.to_string();
        Ok(draft)
    }

    pub fn apply_generated(&mut self, generated: &GeneratedContent) {
        if let Some(headline) = generated.headline() {
            self.title = headline.to_string();
        }
        self.summary = generated.summary.clone();
        if let Some(category) = generated
            .category
            .as_deref()
            .and_then(|c| c.parse::<Category>().ok())
        {
            self.category = category;
        }
        self.tags = generated.tags.clone();
        self.is_ai_generated = true;
    }
}

pub fn placeholder_image_url() -> String {
    let seed: u32 = rand::thread_rng().gen();
    format!("https://picsum.photos/seed/{seed}/800/600")
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub prompt: &'a str,
}

/// AI-drafted article outline returned by `/api/generate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub headline: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: Vec<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl GeneratedContent {
    pub fn headline(&self) -> Option<&str> {
        self.headline.as_deref().or(self.title.as_deref())
    }

    pub(crate) fn placeholder(headline: &str, summary: &str, category: &str, tag: &str) -> Self {
        GeneratedContent {
            headline: Some(headline.to_string()),
            title: None,
            summary: vec![summary.to_string()],
            category: Some(category.to_string()),
            tags: vec![tag.to_string()],
        }
    }
}
