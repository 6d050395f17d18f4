//! Input validation run before anything is submitted to the backend.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid URL regex"));

/// Fail with `InvalidInput` when a required field is blank.
pub fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(field, &format!("{field} is required")));
    }
    Ok(())
}

/// Validate URL format and scheme
pub fn validate_url(url: &str) -> AppResult<()> {
    if url.is_empty() {
        return Err(AppError::invalid_input("url", "URL cannot be empty"));
    }

    if url.len() > 2048 {
        return Err(AppError::invalid_input(
            "url",
            "URL too long (max 2048 characters)",
        ));
    }

    if !URL_REGEX.is_match(url) {
        return Err(AppError::invalid_input(
            "url",
            "Invalid URL format. Must be HTTP or HTTPS",
        ));
    }

    Ok(())
}
