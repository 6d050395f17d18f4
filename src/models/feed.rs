use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::news::Category;
use crate::errors::{AppError, AppResult};
use crate::validation;

/// An RSS source configured on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RssFeed {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Kept as sent by the backend; matched against both raw and mapped names.
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRssFeed {
    pub name: String,
    pub url: String,
    pub category: Category,
}

impl NewRssFeed {
    pub fn validate(&self) -> AppResult<()> {
        validation::require("name", &self.name)?;
        validation::require("url", &self.url)?;
        validation::validate_url(self.url.trim())?;
        if !Category::FEED.contains(&self.category) {
            return Err(AppError::invalid_input(
                "category",
                &format!("RSS sources cannot be filed under {}", self.category),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Ok,
    Error,
    /// Any other status the backend reports.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            HealthState::Ok => "ok",
            HealthState::Error => "error",
            HealthState::Unknown => "unknown",
        };
        f.pad(state)
    }
}

/// Feed id -> last health check result.
pub type FeedHealth = BTreeMap<String, HealthState>;
