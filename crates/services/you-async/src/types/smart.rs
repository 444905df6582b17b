//! Types for the `/smart` endpoint

use serde::{Deserialize, Serialize};

/// Request body for `POST /smart`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartRequest {
    /// The question to answer
    pub query: String,

    /// Continues an existing conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,

    /// Extra guidance for the answer (tone, format, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl SmartRequest {
    /// Create a new smart request with the given query
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            chat_id: None,
            instructions: None,
        }
    }

    /// Set the chat id
    #[must_use]
    pub fn with_chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    /// Set the instructions
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted() {
        let body = serde_json::to_string(&SmartRequest::new("test")).unwrap();
        assert_eq!(body, r#"{"query":"test"}"#);
    }

    #[test]
    fn present_fields_are_snake_case() {
        let v = serde_json::to_value(
            SmartRequest::new("test")
                .with_chat_id("abc")
                .with_instructions("Respond in bullet points"),
        )
        .unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "query": "test",
                "chat_id": "abc",
                "instructions": "Respond in bullet points"
            })
        );
    }
}
