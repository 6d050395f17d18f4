use reqwest::Method;

use super::NewsApi;
use crate::errors::AppResult;
use crate::models::ContactMessage;
use crate::validation;

impl NewsApi {
    /// GET /api/contact-messages. Empty without a backend.
    pub async fn get_contact_messages(&self) -> AppResult<Vec<ContactMessage>> {
        if !self.is_configured() {
            return Ok(Vec::new());
        }
        self.get_json(&["api", "contact-messages"], "Failed to load messages")
            .await
    }

    /// PATCH /api/contact-messages/{id}/read
    pub async fn mark_contact_read(&self, id: &str) -> AppResult<()> {
        validation::require("id", id)?;
        self.send_empty(
            Method::PATCH,
            &["api", "contact-messages", id, "read"],
            "Failed to mark message as read",
        )
        .await
    }

    /// DELETE /api/contact-messages/{id}
    pub async fn delete_contact_message(&self, id: &str) -> AppResult<()> {
        validation::require("id", id)?;
        self.send_empty(
            Method::DELETE,
            &["api", "contact-messages", id],
            "Failed to delete message",
        )
        .await
    }
}
