use serde::Deserialize;
use validator::Validate;

use crate::models::message::NewMessage;
use crate::models::thread::NewThread;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateThreadRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1))]
    pub message: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
}

impl From<CreateThreadRequest> for NewThread {
    fn from(req: CreateThreadRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            author: req.author.trim().to_string(),
            opening_message: req.message,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReplyRequest {
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
}

impl From<CreateReplyRequest> for NewMessage {
    fn from(req: CreateReplyRequest) -> Self {
        Self {
            text: req.text,
            author: req.author.trim().to_string(),
        }
    }
}
