//! Service-side farming assistant.
//!
//! `POST /api/chatbot` answers with the same reply shape `chat::match_intent`
//! produces locally; `GET /api/chatbot/topics` lists what it knows about.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::chat::ChatReply;
use crate::logging::{self, Endpoint};
use crate::model::CrsError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    timestamp: String,
}

/// Body of a successful `POST /api/chatbot` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub category: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl From<ChatResponse> for ChatReply {
    fn from(response: ChatResponse) -> Self {
        ChatReply {
            reply: response.response,
            suggestions: response.suggestions,
            category: response.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatTopics {
    #[serde(default)]
    pub crops: Vec<String>,
    #[serde(default)]
    pub farming_practices: Vec<String>,
    #[serde(default)]
    pub soil_management: Vec<String>,
    #[serde(default)]
    pub government_schemes: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub total_topics: usize,
}

impl ApiClient {
    /// `POST /api/chatbot`. A blank message is rejected before sending.
    pub fn send_chat_message(&self, message: &str) -> Result<ChatReply, CrsError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CrsError::Validation {
                field: "message",
                reason: "is required".to_string(),
            });
        }

        let body = ChatRequest {
            message,
            timestamp: Utc::now().to_rfc3339(),
        };
        let request = self.http.post(self.api_url("/chatbot")).json(&body);
        match self.send_json::<ChatResponse>(request) {
            Ok(response) => {
                logging::debug(Endpoint::Chat, None, &format!("answered as {}", response.category));
                Ok(response.into())
            }
            Err(e) => {
                logging::log_request_failure(Endpoint::Chat, None, "chat message", &e);
                Err(e)
            }
        }
    }

    /// `GET /api/chatbot/topics`.
    pub fn get_chat_topics(&self) -> Result<ChatTopics, CrsError> {
        self.send_json(self.http.get(self.api_url("/chatbot/topics")))
            .inspect_err(|e| {
                logging::log_request_failure(Endpoint::Chat, None, "topic listing", e);
            })
    }
}
