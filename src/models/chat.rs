use serde::{ Serialize, Deserialize };
use uuid::Uuid;

/// Display text shown for a turn that is still waiting on the endpoint.
/// Purely presentational: resolution goes through the turn id, never this string.
pub const PENDING_TEXT: &str = "Thinking...";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnStatus {
    /// Placeholder awaiting its endpoint response.
    Pending,
    Resolved,
}

/// One message unit in the conversation transcript.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    /// Excluded from rendering but always part of the wire history.
    pub hide_in_chat: bool,
    /// True when `text` is a failure message rather than genuine model output.
    pub is_error: bool,
    pub status: TurnStatus,
}

impl Turn {
    fn new(role: Role, text: String) -> Self {
        Turn {
            id: Uuid::new_v4(),
            role,
            text,
            hide_in_chat: false,
            is_error: false,
            status: TurnStatus::Resolved,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Turn::new(Role::User, text.into())
    }

    pub fn model(text: impl Into<String>) -> Self {
        Turn::new(Role::Model, text.into())
    }

    pub fn model_error(text: impl Into<String>) -> Self {
        let mut turn = Turn::new(Role::Model, text.into());
        turn.is_error = true;
        turn
    }

    /// The synthetic context turn seeded at initialization.
    pub fn hidden_context(text: impl Into<String>) -> Self {
        let mut turn = Turn::new(Role::Model, text.into());
        turn.hide_in_chat = true;
        turn
    }

    pub fn pending() -> Self {
        let mut turn = Turn::new(Role::Model, PENDING_TEXT.to_string());
        turn.status = TurnStatus::Pending;
        turn
    }

    pub fn is_pending(&self) -> bool {
        self.status == TurnStatus::Pending
    }
}
