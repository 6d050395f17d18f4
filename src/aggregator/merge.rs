use std::cmp::Ordering;
use std::collections::HashMap;

use feed_rs::model::Entry;

use super::extract::{entry_description, UNKNOWN_SOURCE};
use crate::models::LiveArticle;

/// Newest first; undated articles sink to the end. Stable for ties.
pub fn sort_newest_first(articles: &mut [LiveArticle]) {
    articles.sort_by(|a, b| match (a.published_at, b.published_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Keeps at most `limit` articles per source, preserving order.
pub fn cap_per_source(articles: Vec<LiveArticle>, limit: usize) -> Vec<LiveArticle> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    articles
        .into_iter()
        .filter(|article| {
            let source = article.source.as_deref().unwrap_or(UNKNOWN_SOURCE);
            let count = counts.entry(source.to_string()).or_insert(0);
            if *count < limit {
                *count += 1;
                true
            } else {
                false
            }
        })
        .collect()
}

/// Sort then cap, so each source keeps its most recent items.
pub fn merge(mut articles: Vec<LiveArticle>, per_source_limit: usize) -> Vec<LiveArticle> {
    sort_newest_first(&mut articles);
    cap_per_source(articles, per_source_limit)
}

/// Case-insensitive match on the raw title or description. `needle` must be lowercase.
pub fn entry_matches(entry: &Entry, needle: &str) -> bool {
    let title_match = entry
        .title
        .as_ref()
        .map_or(false, |t| t.content.to_lowercase().contains(needle));
    title_match
        || entry_description(entry).map_or(false, |d| d.to_lowercase().contains(needle))
}
