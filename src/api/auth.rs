use reqwest::Method;

use super::NewsApi;
use crate::errors::{AppError, AppResult};
use crate::models::{LoginRequest, LoginResponse};

impl NewsApi {
    /// POST /api/login. Rejected or unsuccessful logins are `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let result: AppResult<LoginResponse> = self
            .send_json(Method::POST, &["api", "login"], &request, "Invalid credentials")
            .await;

        match result {
            Ok(response) if response.success => {
                tracing::info!(email = %request.email, "Admin logged in");
                Ok(response)
            }
            Ok(response) => {
                log::warn!(
                    "Login refused for {}: {}",
                    request.email,
                    response.message.as_deref().unwrap_or("no reason given")
                );
                Err(AppError::InvalidCredentials)
            }
            Err(AppError::Backend { status, .. }) if (400..500).contains(&status) => {
                Err(AppError::InvalidCredentials)
            }
            Err(e) => Err(e),
        }
    }
}
