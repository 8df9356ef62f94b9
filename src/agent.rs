use std::sync::Arc;
use std::time::Duration;

use log::{ info, error };
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::cli::Args;
use crate::llm::{ ChatConfig, ChatError };
use crate::llm::chat::{ ChatClient, new_client };
use crate::models::chat::Turn;
use crate::transcript::{ Transcript, TranscriptError };

/// Shown when a failure carries no message of its own.
const GENERIC_FAILURE_TEXT: &str = "Something went wrong!";

static BOLD_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(.*?)\*\*").unwrap()
});

/// Markdown emphasis is presented as plain prose: `**text**` becomes `text`,
/// non-greedily, and the result is trimmed.
fn sanitize_response(raw: &str) -> String {
    BOLD_MARKERS.replace_all(raw, "$1").trim().to_string()
}

/// Maps every failure outcome onto the displayable error text. The endpoint's
/// own message wins when it sent one; a timeout names its bound; everything
/// else falls back to the generic message.
fn failure_text(err: &ChatError) -> String {
    let detail = match err {
        ChatError::Endpoint { message: Some(msg), .. } => msg.clone(),
        ChatError::Timeout(secs) => format!("request timed out after {}s", secs),
        _ => GENERIC_FAILURE_TEXT.to_string(),
    };
    format!("Error: {}", detail)
}

/// Response Coordinator: issues one endpoint call per submission and applies
/// exactly one terminal mutation to the transcript.
pub struct ChatAgent {
    chat_client: Arc<dyn ChatClient>,
    request_timeout: Duration,
}

impl ChatAgent {
    pub fn new(args: &Args) -> Self {
        let config = ChatConfig {
            api_url: args.chat_api_url.clone(),
            api_key: args.chat_api_key.clone(),
        };
        info!(
            "Chat client configured: URL={}, Timeout={}s",
            if config.api_url.is_empty() { "<unset>" } else { &config.api_url },
            args.chat_timeout_secs
        );
        ChatAgent {
            chat_client: new_client(&config),
            request_timeout: Duration::from_secs(args.chat_timeout_secs),
        }
    }

    #[cfg(test)]
    fn with_client(chat_client: Arc<dyn ChatClient>, request_timeout: Duration) -> Self {
        ChatAgent { chat_client, request_timeout }
    }

    /// Appends the user turn plus a placeholder, then drives the exchange to
    /// its terminal state. The only error is the explicit rejection of a
    /// submission while an earlier one is still pending.
    pub async fn send_message(
        &self,
        transcript: &mut Transcript,
        text: &str
    ) -> Result<(), TranscriptError> {
        let pending_id = transcript.push_exchange(text)?;
        self.respond(transcript, pending_id).await;
        Ok(())
    }

    /// Resolves the placeholder with either the sanitized reply or an error
    /// turn. Never escapes with an error: every failure becomes transcript
    /// content, and the bounded wait guarantees the call settles.
    pub async fn respond(&self, transcript: &mut Transcript, pending_id: Uuid) {
        let history = transcript.wire_history();

        let outcome = match
            tokio::time::timeout(self.request_timeout, self.chat_client.generate(&history)).await
        {
            Ok(result) => result,
            Err(_) => Err(ChatError::Timeout(self.request_timeout.as_secs())),
        };

        let resolved = match outcome {
            Ok(raw) => Turn::model(sanitize_response(&raw)),
            Err(err) => {
                error!("Chat endpoint call failed: {}", err);
                Turn::model_error(failure_text(&err))
            }
        };

        transcript.resolve(pending_id, resolved);
    }
}
