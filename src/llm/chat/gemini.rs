use async_trait::async_trait;
use log::info;
use reqwest::header::AUTHORIZATION;
use serde::{ Deserialize, Serialize };

use super::ChatClient;
use crate::llm::ChatError;
use crate::models::chat::{ Role, Turn };

#[derive(Serialize)]
struct GeminiGenerateRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    role: Role,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
    #[serde(default)]
    error: Option<GoogleError>,
}

#[derive(Deserialize)]
struct GoogleCandidate {
    content: GoogleContent,
}

#[derive(Deserialize)]
struct GoogleContent {
    #[serde(default)]
    parts: Vec<GooglePart>,
}

#[derive(Deserialize)]
struct GooglePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GoogleError {
    message: String,
}

/// Projects the history into the endpoint's wire shape. Every turn handed in
/// is sent, hidden context included; only `role` and the text reach the wire.
fn wire_contents(history: &[Turn]) -> Vec<GeminiContent> {
    history
        .iter()
        .map(|turn| GeminiContent {
            role: turn.role,
            parts: vec![GeminiPart { text: turn.text.clone() }],
        })
        .collect()
}

fn first_candidate_text(body: GoogleResponse) -> Option<String> {
    body.candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
}

pub struct GeminiChatClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GeminiChatClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        GeminiChatClient {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl ChatClient for GeminiChatClient {
    async fn generate(&self, history: &[Turn]) -> Result<String, ChatError> {
        let payload = GeminiGenerateRequest {
            contents: wire_contents(history),
        };
        info!(
            "GeminiChatClient::generate() → {} turns to {}",
            payload.contents.len(),
            self.api_url
        );

        let resp = self.client
            .post(&self.api_url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&payload)
            .send().await?;

        let status = resp.status();
        let body: GoogleResponse = resp.json().await?;

        if !status.is_success() || body.error.is_some() {
            return Err(ChatError::Endpoint {
                status: status.as_u16(),
                message: body.error.map(|e| e.message),
            });
        }

        first_candidate_text(body).ok_or(ChatError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_contents_keeps_order_and_hidden_turns() {
        let history = vec![
            Turn::hidden_context("context preamble"),
            Turn::user("hello"),
            Turn::model("hi!"),
        ];

        let contents = wire_contents(&history);
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role, Role::Model);
        assert_eq!(contents[0].parts[0].text, "context preamble");
        assert_eq!(contents[1].role, Role::User);
        assert_eq!(contents[2].parts[0].text, "hi!");
    }

    #[test]
    fn request_serializes_to_contents_parts_shape() {
        let payload = GeminiGenerateRequest {
            contents: wire_contents(&[Turn::user("hello")]),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "hello" }] }
                ]
            })
        );
    }

    #[test]
    fn success_body_yields_first_candidate_text() {
        let body: GoogleResponse = serde_json
            ::from_value(
                json!({
                    "candidates": [
                        { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                        { "content": { "parts": [{ "text": "other candidate" }] } }
                    ]
                })
            )
            .unwrap();
        assert_eq!(first_candidate_text(body).as_deref(), Some("first"));
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        let body: GoogleResponse = serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(first_candidate_text(body).is_none());

        let body: GoogleResponse = serde_json
            ::from_value(json!({ "candidates": [{ "content": { "parts": [] } }] }))
            .unwrap();
        assert!(first_candidate_text(body).is_none());
    }

    #[test]
    fn error_body_is_decoded() {
        let body: GoogleResponse = serde_json
            ::from_value(json!({ "error": { "message": "quota exceeded" } }))
            .unwrap();
        assert_eq!(body.error.map(|e| e.message).as_deref(), Some("quota exceeded"));
    }
}
