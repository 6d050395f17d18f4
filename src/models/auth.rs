use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::validation;

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        validation::require("email", &self.email)?;
        validation::require("password", &self.password)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "access_token")]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let req = LoginRequest {
            email: "admin@gathered.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());

        let req = LoginRequest {
            email: "admin@gathered.com".to_string(),
            password: "admin".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_request_leaves_email_format_to_backend() {
        let req = LoginRequest {
            email: "admin@localhost".to_string(),
            password: "admin".to_string(),
        };
        assert!(req.validate().is_ok());

        let req = LoginRequest {
            email: "   ".to_string(),
            password: "admin".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_response_accepts_access_token() {
        let res: LoginResponse =
            serde_json::from_str(r#"{"success": true, "access_token": "abc"}"#).unwrap();
        assert!(res.success);
        assert_eq!(res.token.as_deref(), Some("abc"));
    }
}
