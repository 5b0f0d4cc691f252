//! JSON shapes exchanged with the mentor backend.

use crate::error::ChatError;
use crate::session::state::ChatReply;
use crate::session::{Message, Metadata, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
    pub context: RequestContext<'a>,
}

#[derive(Debug, Serialize)]
pub struct RequestContext<'a> {
    pub chat_history: Vec<HistoryEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry<'a> {
    pub role: Role,
    pub content: &'a str,
}

impl<'a> SendRequest<'a> {
    pub fn new(message: &'a str, prior: &'a [Message], session_id: Option<&'a str>) -> Self {
        let chat_history = prior
            .iter()
            .map(|message| HistoryEntry {
                role: message.role,
                content: &message.content,
            })
            .collect();

        Self {
            message,
            session_id,
            context: RequestContext { chat_history },
        }
    }
}

/// Standard `{ success, message, data }` response wrapper.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> Result<T, ChatError> {
        if !self.success {
            let message = if self.message.is_empty() {
                "the server reported a failure".to_string()
            } else {
                self.message
            };
            return Err(ChatError::Backend(message));
        }

        self.data
            .ok_or_else(|| ChatError::Backend("response is missing its data payload".to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct SendData {
    pub message: ReplyMessage,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl From<SendData> for ChatReply {
    fn from(data: SendData) -> Self {
        Self {
            content: data.message.content,
            metadata: data.message.metadata,
            session_id: data.session_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryData {
    #[serde(default)]
    pub messages: Vec<Message>,
}

pub fn decode_send(body: &str) -> Result<ChatReply, ChatError> {
    let envelope: Envelope<SendData> = serde_json::from_str(body)?;
    envelope.into_data().map(ChatReply::from)
}

pub fn decode_history(body: &str) -> Result<Vec<Message>, ChatError> {
    let envelope: Envelope<HistoryData> = serde_json::from_str(body)?;
    envelope.into_data().map(|data| data.messages)
}
