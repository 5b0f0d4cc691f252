use crate::session::state::ChatReply;
use crate::session::Message;

/// Completion of a background transport call, delivered to the UI thread.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    SendCompleted(Result<ChatReply, String>),
    HistoryLoaded {
        session_id: String,
        result: Result<Vec<Message>, String>,
    },
}
