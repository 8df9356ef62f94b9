pub mod gemini;

use async_trait::async_trait;
use std::sync::Arc;

use self::gemini::GeminiChatClient;
use super::{ ChatConfig, ChatError };
use crate::models::chat::Turn;

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends the full conversation history and returns the raw reply text.
    async fn generate(&self, history: &[Turn]) -> Result<String, ChatError>;
}

pub fn new_client(config: &ChatConfig) -> Arc<dyn ChatClient> {
    Arc::new(GeminiChatClient::new(config.api_url.clone(), config.api_key.clone()))
}
