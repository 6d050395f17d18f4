use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::AppResult;

/// Saved login, so later commands run as the same admin.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Session {
    pub api_url: String,
    pub email: String,
    pub token: Option<String>,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(api_url: &Url, email: &str, token: Option<String>) -> Self {
        Session {
            api_url: api_url.to_string(),
            email: email.to_string(),
            token,
            logged_in_at: Utc::now(),
        }
    }

    /// `Ok(None)` when nobody has logged in yet.
    pub fn load(path: &Path) -> AppResult<Option<Session>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session = serde_json::from_str(&raw)?;
        Ok(Some(session))
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::debug!("Session saved to {}", path.display());
        Ok(())
    }

    /// Removes the saved session. Returns whether one existed.
    pub fn clear(path: &Path) -> AppResult<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// The bearer token, only if it was issued by `api_url`.
    pub fn token_for(&self, api_url: &Url) -> Option<&str> {
        if self.api_url == api_url.as_str() {
            self.token.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn api() -> Url {
        Url::parse("https://news.example.com/").unwrap()
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Session::load(&dir.path().join("session.json")).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let session = Session::new(&api(), "admin@gathered.com", Some("tok".to_string()));

        session.save(&path).unwrap();
        assert_eq!(Session::load(&path).unwrap(), Some(session));

        assert!(Session::clear(&path).unwrap());
        assert!(!Session::clear(&path).unwrap());
        assert_eq!(Session::load(&path).unwrap(), None);
    }

    #[test]
    fn test_corrupt_session_is_session_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(Session::load(&path), Err(AppError::SessionError)));
    }

    #[test]
    fn test_token_only_for_same_backend() {
        let session = Session::new(&api(), "admin@gathered.com", Some("tok".to_string()));
        assert_eq!(session.token_for(&api()), Some("tok"));
        let other = Url::parse("https://staging.example.com/").unwrap();
        assert_eq!(session.token_for(&other), None);
    }
}
