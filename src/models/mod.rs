pub mod article;
pub mod auth;
pub mod contact;
pub mod feed;
pub mod news;
pub mod stats;
pub mod subscriber;

pub use article::{ArticleList, LiveArticle};
pub use auth::{LoginRequest, LoginResponse};
pub use contact::{ContactMessage, MessageStatus};
pub use feed::{FeedHealth, HealthState, NewRssFeed, RssFeed};
pub use news::{map_category, Category, GeneratedContent, NewsDraft, NewsItem};
pub use stats::DashboardStats;
pub use subscriber::{NewsletterReceipt, Subscriber};

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as the field's default, same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
