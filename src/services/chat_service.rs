use std::sync::Arc;

use crate::error::{Error, Result};
use crate::services::gemini_service::TextGenerator;

#[derive(Clone)]
pub struct ChatService {
    generator: Arc<dyn TextGenerator>,
}

impl ChatService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn reply(&self, user_message: &str) -> Result<String> {
        if user_message.trim().is_empty() {
            return Err(Error::BadRequest("userMessage is required".to_string()));
        }
        self.generator.generate(&build_chat_prompt(user_message)).await
    }
}

pub fn build_chat_prompt(user_message: &str) -> String {
    format!(
        "User says: \"{}\". Provide a helpful, concise response.",
        user_message
    )
}
