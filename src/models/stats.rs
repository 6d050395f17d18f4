use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::null_as_default;

/// Dashboard counters. All zero when no backend is configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ai_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub breaking_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub originals: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub live: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feeds: u64,
    #[serde(default)]
    pub categories: Option<BTreeMap<String, u64>>,
}

impl DashboardStats {
    /// Bar scale for the category chart; never below 1.
    pub fn category_max(&self) -> u64 {
        self.categories
            .as_ref()
            .and_then(|c| c.values().copied().max())
            .unwrap_or(0)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_deserialize_camel_case() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"total": 12, "aiCount": 3, "breakingCount": 1, "featuredCount": 2,
                "originals": 5, "live": 40, "feeds": 6, "categories": {"India": 4, "World": 8}}"#,
        )
        .unwrap();
        assert_eq!(stats.ai_count, 3);
        assert_eq!(stats.category_max(), 8);
    }

    #[test]
    fn test_category_max_never_zero() {
        assert_eq!(DashboardStats::default().category_max(), 1);
    }
}
