use crate::session::{Message, Metadata};

/// Reply to a sent message, as resolved by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub content: String,
    pub metadata: Option<Metadata>,
    pub session_id: Option<String>,
}

/// Conversation state owned by the UI thread.
///
/// `is_loading` is only true between the start of a send/fetch and its
/// resolution. `error` is cleared whenever a new action starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub session_id: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ConversationState {
    /// Optimistically appends the user turn and returns the history that
    /// preceded it.
    pub fn begin_send(&mut self, message: Message) -> Vec<Message> {
        self.is_loading = true;
        self.error = None;
        let prior = self.messages.clone();
        self.messages.push(message);
        prior
    }

    /// The optimistic user turn is kept on failure.
    pub fn finish_send(&mut self, result: Result<ChatReply, String>) {
        self.is_loading = false;
        match result {
            Ok(reply) => {
                if reply.session_id.is_some() {
                    self.session_id = reply.session_id;
                }
                self.messages
                    .push(Message::assistant(reply.content, reply.metadata));
            }
            Err(error) => self.error = Some(error),
        }
    }

    pub fn begin_history(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn finish_history(&mut self, session_id: String, result: Result<Vec<Message>, String>) {
        self.is_loading = false;
        match result {
            Ok(messages) => {
                self.messages = messages;
                self.session_id = Some(session_id);
            }
            Err(error) => self.error = Some(error),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
