// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

/// Who authored a conversation message.
///
/// Matches the Gemini wire vocabulary: the assistant side is `model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single message in the conversation history.
///
/// Messages are append-only: the enclosing sequence grows, entries are never
/// mutated after creation, and insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, content: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, content: text.into() }
    }
}

/// Request sent to a model provider.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    /// Provider-side system instruction, when the conversation has one.
    pub system: Option<String>,
    /// Full ordered history; the last entry is the message being answered.
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// A bare single-shot prompt with no system instruction.
    pub fn single(prompt: impl Into<String>) -> Self {
        Self { system: None, messages: vec![ChatMessage::user(prompt)] }
    }

    /// A multi-turn request carrying a system instruction.
    pub fn with_system(system: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self { system: Some(system.into()), messages }
    }

    /// Text of the most recent user message, if any.
    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_user_sets_role_and_text() {
        let m = ChatMessage::user("hello");
        assert_eq!(m.role, Role::User);
        assert_eq!(m.content, "hello");
    }

    #[test]
    fn message_model_sets_role_and_text() {
        let m = ChatMessage::model("reply");
        assert_eq!(m.role, Role::Model);
        assert_eq!(m.content, "reply");
    }

    #[test]
    fn single_request_has_one_user_message_and_no_system() {
        let req = ChatRequest::single("analyse this");
        assert!(req.system.is_none());
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.last_user_text(), Some("analyse this"));
    }

    #[test]
    fn last_user_text_skips_trailing_model_message() {
        let req = ChatRequest::with_system(
            "sys",
            vec![
                ChatMessage::user("question"),
                ChatMessage::model("answer"),
            ],
        );
        assert_eq!(req.last_user_text(), Some("question"));
    }

    #[test]
    fn last_user_text_is_none_for_empty_history() {
        assert!(ChatRequest::default().last_user_text().is_none());
    }

    #[test]
    fn role_serialises_lowercase() {
        let json = serde_json::to_string(&ChatMessage::model("x")).unwrap();
        assert!(json.contains(r#""role":"model""#), "got: {json}");
    }
}
