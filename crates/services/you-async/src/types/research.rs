//! Types for the `/research` endpoint

use serde::{Deserialize, Serialize};

/// Request body for `POST /research`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRequest {
    /// The research question
    pub query: String,

    /// Continues an existing conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

impl ResearchRequest {
    /// Create a new research request with the given query
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            chat_id: None,
        }
    }

    /// Set the chat id
    #[must_use]
    pub fn with_chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }
}
