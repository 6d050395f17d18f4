use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub whatsapp: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct NewsletterRequest<'a> {
    pub subject: &'a str,
    pub content: &'a str,
}

/// Backend answer to a newsletter send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsletterReceipt {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}
