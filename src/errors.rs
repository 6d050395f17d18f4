use thiserror::Error;

/// Application-wide error types with user-friendly messages
#[derive(Debug, Error)]
pub enum AppError {
    // Configuration
    #[error("Backend not configured - set NEWS_ADMIN_API_URL or pass --api-url")]
    BackendNotConfigured,
    #[error("System configuration error: {message}")]
    ConfigurationError { message: String },

    // Authentication
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Session error - please log in again")]
    SessionError,

    // Validation Errors
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },
    #[error("{resource} not found")]
    ResourceNotFound { resource: String },

    // Backend Errors
    #[error("{message} (HTTP {status})")]
    Backend { status: u16, message: String },

    #[error("Unexpected response from backend: {message}")]
    InvalidResponse { message: String },

    // Feed-related Errors
    #[error("Unable to parse feed - invalid format")]
    FeedParseError,

    // External Service Errors
    #[error("Network error - please check your connection")]
    NetworkError,
    #[error("Service temporarily unavailable - please try again later")]
    ServiceUnavailable,

    // System Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Helper functions for common error conversions
impl AppError {
    pub fn invalid_input(field: &str, message: &str) -> Self {
        AppError::InvalidInput {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn resource_not_found(resource: &str) -> Self {
        AppError::ResourceNotFound {
            resource: resource.to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        AppError::ConfigurationError {
            message: message.into(),
        }
    }

    /// Errors worth a manual retry: the backend may come back.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::NetworkError | AppError::ServiceUnavailable => true,
            AppError::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Convert network/reqwest errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            log::error!("Malformed backend response: {}", err);
            return AppError::InvalidResponse {
                message: err.to_string(),
            };
        }
        log::error!("Network error: {}", err);
        if err.is_timeout() || err.is_connect() {
            AppError::NetworkError
        } else {
            AppError::ServiceUnavailable
        }
    }
}

/// Convert feed parsing errors
impl From<feed_rs::parser::ParseFeedError> for AppError {
    fn from(err: feed_rs::parser::ParseFeedError) -> Self {
        log::warn!("Feed parse error: {}", err);
        AppError::FeedParseError
    }
}

/// Convert session file (de)serialization errors
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        log::warn!("Session data error: {}", err);
        AppError::SessionError
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::configuration(format!("invalid URL: {err}"))
    }
}
