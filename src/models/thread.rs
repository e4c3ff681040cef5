use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::message::Message;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    /// Oldest first; the first entry is the opening post.
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone)]
pub struct NewThread {
    pub title: String,
    pub author: String,
    pub opening_message: String,
}
