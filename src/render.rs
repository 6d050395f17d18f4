//! Plain-text views of backend data. Every function returns the text so callers
//! decide where it goes.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{
    ContactMessage, DashboardStats, FeedHealth, HealthState, LiveArticle, NewsItem,
    NewsletterReceipt, RssFeed, Subscriber,
};

const BAR_WIDTH: u64 = 30;

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn date(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn flags(item: &NewsItem) -> String {
    let mut flags = Vec::new();
    if item.is_breaking {
        flags.push("B");
    }
    if item.is_featured {
        flags.push("F");
    }
    if item.is_ai_generated {
        flags.push("AI");
    }
    flags.join(",")
}

pub fn news_table(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return "No articles found in database.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8}  {:<48}  {:<12}  {:<10}  {}",
        "ID", "TITLE", "CATEGORY", "DATE", "FLAGS"
    );
    for item in items {
        let _ = writeln!(
            out,
            "{:<8}  {:<48}  {:<12}  {:<10}  {}",
            short_id(&item.id),
            truncate(&item.title, 48),
            item.category,
            date(item.published_at),
            flags(item)
        );
    }
    out
}

pub fn feeds_table(feeds: &[RssFeed], health: &FeedHealth) -> String {
    if feeds.is_empty() {
        return "No RSS sources configured.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8}  {:<24}  {:<12}  {:<8}  {}",
        "ID", "NAME", "CATEGORY", "HEALTH", "URL"
    );
    for feed in feeds {
        let state = health
            .get(&feed.id)
            .map(|h| h.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let _ = writeln!(
            out,
            "{:<8}  {:<24}  {:<12}  {:<8}  {}",
            short_id(&feed.id),
            truncate(&feed.name, 24),
            feed.category,
            state,
            feed.url
        );
    }
    out
}

/// Health counts, then every source that is not healthy.
pub fn health_report(feeds: &[RssFeed], health: &FeedHealth) -> String {
    let state_of = |feed: &RssFeed| health.get(&feed.id).copied().unwrap_or(HealthState::Unknown);
    let ok = feeds.iter().filter(|f| state_of(f) == HealthState::Ok).count();
    let failing: Vec<&RssFeed> = feeds
        .iter()
        .filter(|f| state_of(f) != HealthState::Ok)
        .collect();

    let mut out = format!("{} of {} sources healthy\n", ok, feeds.len());
    for feed in failing {
        let _ = writeln!(out, "  {:<8} {:<24}  {}", state_of(feed), truncate(&feed.name, 24), feed.url);
    }
    out
}

pub fn subscribers_table(subscribers: &[Subscriber]) -> String {
    if subscribers.is_empty() {
        return "No subscribers yet.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20}  {:<32}  {:<16}  {}",
        "NAME", "EMAIL", "WHATSAPP", "SUBSCRIBED AT"
    );
    for sub in subscribers {
        let _ = writeln!(
            out,
            "{:<20}  {:<32}  {:<16}  {}",
            truncate(sub.name.as_deref().unwrap_or("-"), 20),
            truncate(&sub.email, 32),
            sub.whatsapp.as_deref().unwrap_or("-"),
            sub.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    let _ = writeln!(out, "{} subscribers", subscribers.len());
    out
}

pub fn inbox(messages: &[ContactMessage]) -> String {
    let unread = messages.iter().filter(|m| m.is_unread()).count();
    let mut out = format!("Contact Inbox ({} messages, {} unread)\n", messages.len(), unread);
    if messages.is_empty() {
        out.push_str("No messages yet.\n");
        return out;
    }
    for msg in messages {
        let marker = if msg.is_unread() { " [NEW]" } else { "" };
        let _ = writeln!(
            out,
            "\n{} <{}>{}  {}  id:{}",
            msg.name,
            msg.email,
            marker,
            msg.created_at.format("%Y-%m-%d %H:%M"),
            msg.id
        );
        for line in msg.message.lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}

pub fn stats(stats: &DashboardStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total articles: {}  (Orig: {} • Live: ~{})",
        stats.total, stats.originals, stats.live
    );
    let _ = writeln!(out, "AI generated:   {}", stats.ai_count);
    let _ = writeln!(out, "Breaking:       {}", stats.breaking_count);
    let _ = writeln!(out, "Featured:       {}", stats.featured_count);
    let _ = writeln!(out, "RSS sources:    {}", stats.feeds);
    out.push('\n');

    match stats.categories.as_ref().filter(|c| !c.is_empty()) {
        None => out.push_str("No category data\n"),
        Some(categories) => {
            let max = stats.category_max();
            for (category, count) in categories {
                let width = (count * BAR_WIDTH / max) as usize;
                let _ = writeln!(out, "{:<12} {:>5} {}", category, count, "#".repeat(width));
            }
        }
    }
    out
}

pub fn articles(list: &[LiveArticle]) -> String {
    if list.is_empty() {
        return "No articles.\n".to_string();
    }
    let mut out = String::new();
    for article in list {
        let when = article
            .published_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "undated".to_string());
        let _ = writeln!(
            out,
            "{}  [{}] {}",
            when,
            article.source.as_deref().unwrap_or("Unknown"),
            article.title
        );
        for line in &article.summary {
            let _ = writeln!(out, "    {line}");
        }
        if let Some(link) = &article.link {
            let _ = writeln!(out, "    {link}");
        }
    }
    out
}

pub fn newsletter_receipt(receipt: &NewsletterReceipt) -> String {
    if receipt.success {
        format!(
            "Sent successfully! Your newsletter has been queued for {} subscribers.\n",
            receipt.count
        )
    } else {
        "Newsletter was not sent.\n".to_string()
    }
}
