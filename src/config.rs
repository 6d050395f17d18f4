use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::errors::{AppError, AppResult};
use crate::models::Category;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Runtime configuration for the admin client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL. `None` puts every call on its no-backend path.
    pub api_url: Option<Url>,
    pub timeout: Duration,
    pub session_file: PathBuf,
    pub user_agent: String,
    pub aggregator: AggregatorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: default_session_file(),
            user_agent: default_user_agent(),
            aggregator: AggregatorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let api_url = match env::var("NEWS_ADMIN_API_URL") {
            Ok(raw) if !raw.trim().is_empty() => {
                log::info!("Using backend from NEWS_ADMIN_API_URL: {}", raw);
                Some(parse_api_url(&raw)?)
            }
            _ => {
                log::info!("No backend configured; using client-side fallbacks");
                None
            }
        };
        let timeout = match env::var("NEWS_ADMIN_TIMEOUT_SECS") {
            Ok(secs) => {
                log::info!("Using timeout from NEWS_ADMIN_TIMEOUT_SECS: {}", secs);
                let secs = secs.trim().parse::<u64>().map_err(|_| {
                    AppError::configuration("NEWS_ADMIN_TIMEOUT_SECS must be a number of seconds")
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => {
                log::info!("Using default timeout: {}s", DEFAULT_TIMEOUT_SECS);
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        };
        let session_file = match env::var("NEWS_ADMIN_SESSION_FILE") {
            Ok(path) => {
                log::info!("Using session file from NEWS_ADMIN_SESSION_FILE: {}", path);
                PathBuf::from(path)
            }
            Err(_) => {
                let path = default_session_file();
                log::info!("Using default session file: {}", path.display());
                path
            }
        };
        let user_agent = match env::var("NEWS_ADMIN_USER_AGENT") {
            Ok(agent) => {
                log::info!("Using user agent from NEWS_ADMIN_USER_AGENT: {}", agent);
                agent
            }
            Err(_) => {
                let agent = default_user_agent();
                log::info!("Using default user agent: {}", agent);
                agent
            }
        };

        Ok(AppConfig {
            api_url,
            timeout,
            session_file,
            user_agent,
            aggregator: AggregatorConfig::default(),
        })
    }

    pub fn with_api_url(mut self, raw: &str) -> AppResult<Self> {
        self.api_url = if raw.trim().is_empty() {
            None
        } else {
            Some(parse_api_url(raw)?)
        };
        Ok(self)
    }
}

/// Parses a backend base URL, normalising it to end in `/` so joins keep any path prefix.
pub fn parse_api_url(raw: &str) -> AppResult<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::configuration(format!(
            "backend URL must be http or https, got '{other}'"
        ))),
    }
}

fn default_session_file() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".news-admin").join("session.json"),
        None => PathBuf::from(".news-admin-session.json"),
    }
}

fn default_user_agent() -> String {
    format!("news-admin/{}", env!("CARGO_PKG_VERSION"))
}

/// Knobs for the client-side RSS fallback.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub max_feeds: usize,
    pub per_source_limit: usize,
    pub summary_chars: usize,
    pub search_categories: Vec<Category>,
    pub search_feeds_per_category: usize,
    /// Built-in feeds used when the backend has none for a category.
    pub default_feeds: BTreeMap<Category, Vec<String>>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        let mut default_feeds = BTreeMap::new();
        default_feeds.insert(
            Category::World,
            vec!["http://feeds.bbci.co.uk/news/world/rss.xml".to_string()],
        );
        AggregatorConfig {
            max_feeds: 4,
            per_source_limit: 5,
            summary_chars: 150,
            search_categories: vec![Category::World, Category::India, Category::Technology],
            search_feeds_per_category: 2,
            default_feeds,
        }
    }
}
