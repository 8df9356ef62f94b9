pub mod chat;

use std::error::Error;
use std::fmt;

/// Configuration for the remote chat endpoint, assembled from `Args`.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Full URL of the generate endpoint.
    pub api_url: String,
    pub api_key: String,
}

/// Failure outcomes of one endpoint round trip. All of these collapse into a
/// single error turn at the transcript boundary; the variants exist so logs
/// and the displayed message can tell them apart.
#[derive(Debug)]
pub enum ChatError {
    /// Request never produced a usable response.
    Transport(reqwest::Error),
    /// Response received with a non-success status or an embedded error payload.
    Endpoint {
        status: u16,
        message: Option<String>,
    },
    /// Success status but no candidate text to show.
    EmptyResponse,
    /// Bounded wait expired before the endpoint settled.
    Timeout(u64),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Transport(e) => write!(f, "Chat endpoint transport error: {}", e),
            ChatError::Endpoint { status, message } =>
                match message {
                    Some(msg) => write!(f, "Chat endpoint error (status {}): {}", status, msg),
                    None => write!(f, "Chat endpoint error (status {})", status),
                },
            ChatError::EmptyResponse =>
                write!(f, "Chat endpoint returned no candidate text"),
            ChatError::Timeout(secs) =>
                write!(f, "Chat endpoint request timed out after {}s", secs),
        }
    }
}

impl Error for ChatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ChatError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Transport(err)
    }
}
