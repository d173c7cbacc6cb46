//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The signed-in user.
    Me,
    /// The text-generation collaborator.
    Ai,
}

/// A single chat message. Messages are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_ai: bool,
}

impl Message {
    /// Creates a message typed by the user.
    pub fn from_me(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender: Sender::Me,
            text: text.into(),
            timestamp: Utc::now(),
            is_ai: false,
        }
    }

    /// Creates a message returned by the AI.
    pub fn from_ai(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender: Sender::Ai,
            text: text.into(),
            timestamp: Utc::now(),
            is_ai: true,
        }
    }
}
