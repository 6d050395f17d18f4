use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Unread,
    Read,
}

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn is_unread(&self) -> bool {
        self.status == MessageStatus::Unread
    }
}

/// Local mirror of a mark-as-read: flips the matching message without a refetch.
pub fn mark_read_locally(messages: &mut [ContactMessage], id: &str) -> bool {
    match messages.iter_mut().find(|m| m.id == id) {
        Some(message) => {
            message.status = MessageStatus::Read;
            true
        }
        None => false,
    }
}
