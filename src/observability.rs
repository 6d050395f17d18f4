use std::time::Instant;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment configuration
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: String,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
            log_format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        }
    }
}

/// Initialize structured logging and tracing.
///
/// Output goes to stderr so command output on stdout stays pipeable. `log` records
/// emitted by library code are forwarded through the tracing-log bridge that
/// `init()` installs.
pub fn init_logging(verbose: bool) {
    let config = ObservabilityConfig::from_env();
    let log_level = if verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    if config.log_format == "json" {
        // JSON structured logging for log shippers
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .init();
    }

    info!(
        service = "news-admin",
        version = env!("CARGO_PKG_VERSION"),
        log_level = %log_level,
        log_format = %config.log_format,
        "Logging initialized"
    );
}

/// Times one backend request and logs it when finished.
pub struct RequestTimer {
    method: String,
    path: String,
    started: Instant,
}

impl RequestTimer {
    pub fn start(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            started: Instant::now(),
        }
    }

    pub fn finish(self, status: u16) {
        let duration_ms = self.started.elapsed().as_millis() as u64;
        if status < 400 {
            info!(
                method = %self.method,
                path = %self.path,
                status = status,
                duration_ms = duration_ms,
                "Backend request completed"
            );
        } else {
            warn!(
                method = %self.method,
                path = %self.path,
                status = status,
                duration_ms = duration_ms,
                "Backend request failed"
            );
        }
    }
}

pub fn log_feed_processing(feed_url: &str, items_processed: usize, started: Instant) {
    info!(
        feed_url = feed_url,
        items_processed = items_processed,
        duration_ms = started.elapsed().as_millis() as u64,
        "Feed processing completed"
    );
}
