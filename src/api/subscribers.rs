use reqwest::Method;

use super::NewsApi;
use crate::errors::AppResult;
use crate::models::subscriber::NewsletterRequest;
use crate::models::{NewsletterReceipt, Subscriber};
use crate::validation;

impl NewsApi {
    /// GET /api/subscribers. Empty without a backend.
    pub async fn get_subscribers(&self) -> AppResult<Vec<Subscriber>> {
        if !self.is_configured() {
            return Ok(Vec::new());
        }
        self.get_json(&["api", "subscribers"], "Failed to fetch subscribers")
            .await
    }

    /// POST /api/newsletter/send. Without a backend nothing is sent and the
    /// receipt reports `success: false`.
    pub async fn send_newsletter(&self, subject: &str, content: &str) -> AppResult<NewsletterReceipt> {
        validation::require("subject", subject)?;
        validation::require("content", content)?;
        if !self.is_configured() {
            return Ok(NewsletterReceipt::default());
        }

        let receipt: NewsletterReceipt = self
            .send_json(
                Method::POST,
                &["api", "newsletter", "send"],
                &NewsletterRequest { subject, content },
                "Failed to send newsletter",
            )
            .await?;
        tracing::info!(
            success = receipt.success,
            recipients = receipt.count,
            "Newsletter submitted"
        );
        Ok(receipt)
    }
}
