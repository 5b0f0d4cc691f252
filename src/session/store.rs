use crate::api::ChatTransport;
use crate::event::StoreEvent;
use crate::session::state::ConversationState;
use crate::session::Message;
use std::future::Future;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, error, warn};

/// Called from the runtime after a completion is queued, so the UI can wake.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Conversation store owned by the UI thread.
///
/// Actions mutate state synchronously and hand network calls to the tokio
/// runtime. Completions come back as [`StoreEvent`]s and are applied by
/// [`ChatStore::drain_events`], one at a time, on the owning thread. An
/// in-flight call is never cancelled: its completion is applied even after
/// [`ChatStore::reset_chat`].
pub struct ChatStore {
    state: ConversationState,
    transport: Arc<dyn ChatTransport>,
    runtime_handle: Handle,
    tx: Sender<StoreEvent>,
    rx: Receiver<StoreEvent>,
    waker: Option<Waker>,
}

impl ChatStore {
    pub fn new(transport: Arc<dyn ChatTransport>, runtime_handle: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: ConversationState::default(),
            transport,
            runtime_handle,
            tx,
            rx,
            waker: None,
        }
    }

    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn send_message(&mut self, text: &str) {
        let prior = self.state.begin_send(Message::user(text));
        let session_id = self.state.session_id.clone();
        let text = text.to_string();
        debug!(history = prior.len(), "dispatching chat message");

        let transport = Arc::clone(&self.transport);
        self.spawn(async move {
            let result = transport
                .send_message(&text, &prior, session_id.as_deref())
                .await
                .map_err(|err| {
                    error!(error = %err, "error sending message");
                    err.to_string()
                });
            StoreEvent::SendCompleted(result)
        });
    }

    pub fn reset_chat(&mut self) {
        debug!("resetting conversation");
        self.state.reset();
    }

    pub fn load_history(&mut self, session_id: &str) {
        self.state.begin_history();
        let session_id = session_id.to_string();
        debug!(%session_id, "loading chat history");

        let transport = Arc::clone(&self.transport);
        self.spawn(async move {
            let result = transport.get_history(&session_id).await.map_err(|err| {
                error!(%session_id, error = %err, "error loading chat history");
                err.to_string()
            });
            StoreEvent::HistoryLoaded { session_id, result }
        });
    }

    /// Applies every completion queued so far. Returns whether anything changed.
    pub fn drain_events(&mut self) -> bool {
        let mut applied = false;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.apply_event(event);
                    applied = true;
                }
                // The store holds a sender itself, so the channel never disconnects.
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    fn apply_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::SendCompleted(result) => self.state.finish_send(result),
            StoreEvent::HistoryLoaded { session_id, result } => {
                if let Ok(messages) = &result {
                    debug!(%session_id, count = messages.len(), "chat history loaded");
                }
                self.state.finish_history(session_id, result);
            }
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = StoreEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        let waker = self.waker.clone();
        self.runtime_handle.spawn(async move {
            let event = task.await;
            if tx.send(event).is_err() {
                warn!("conversation store dropped before the request completed");
                return;
            }
            if let Some(waker) = waker {
                waker();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::ChatStore;
    use crate::api::ChatTransport;
    use crate::error::ChatError;
    use crate::session::state::{ChatReply, ConversationState};
    use crate::session::{Message, Metadata, Role};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::runtime::Runtime;

    #[derive(Debug, Clone, PartialEq)]
    struct SentCall {
        text: String,
        prior: Vec<String>,
        session_id: Option<String>,
    }

    struct FakeTransport {
        reply: Result<ChatReply, String>,
        history: Result<Vec<Message>, String>,
        sent: Mutex<Vec<SentCall>>,
        history_requests: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        fn replying(content: &str, session_id: Option<&str>) -> Self {
            Self {
                reply: Ok(ChatReply {
                    content: content.to_string(),
                    metadata: None,
                    session_id: session_id.map(str::to_string),
                }),
                history: Ok(Vec::new()),
                sent: Mutex::new(Vec::new()),
                history_requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                history: Err(message.to_string()),
                sent: Mutex::new(Vec::new()),
                history_requests: Mutex::new(Vec::new()),
            }
        }

        fn with_history(mut self, history: Vec<Message>) -> Self {
            self.history = Ok(history);
            self
        }

        fn with_reply_metadata(mut self, metadata: Metadata) -> Self {
            if let Ok(reply) = self.reply.as_mut() {
                reply.metadata = Some(metadata);
            }
            self
        }

        fn sent(&self) -> Vec<SentCall> {
            self.sent.lock().expect("sent calls lock").clone()
        }

        fn history_requests(&self) -> Vec<String> {
            self.history_requests
                .lock()
                .expect("history requests lock")
                .clone()
        }
    }

    #[async_trait]
    impl ChatTransport for FakeTransport {
        async fn send_message(
            &self,
            text: &str,
            prior: &[Message],
            session_id: Option<&str>,
        ) -> Result<ChatReply, ChatError> {
            self.sent.lock().expect("sent calls lock").push(SentCall {
                text: text.to_string(),
                prior: prior.iter().map(|m| m.content.clone()).collect(),
                session_id: session_id.map(str::to_string),
            });
            self.reply.clone().map_err(ChatError::Backend)
        }

        async fn get_history(&self, session_id: &str) -> Result<Vec<Message>, ChatError> {
            self.history_requests
                .lock()
                .expect("history requests lock")
                .push(session_id.to_string());
            self.history.clone().map_err(ChatError::Backend)
        }
    }

    fn store_with(runtime: &Runtime, transport: Arc<FakeTransport>) -> ChatStore {
        ChatStore::new(transport, runtime.handle().clone())
    }

    fn settle(store: &mut ChatStore) {
        for _ in 0..500 {
            if store.drain_events() && !store.state().is_loading {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("store never received a completion");
    }

    #[test]
    fn send_appends_user_message_before_the_reply_arrives() {
        let runtime = Runtime::new().expect("runtime should build");
        let transport = Arc::new(FakeTransport::replying("Welcome!", Some("s-1")));
        let mut store = store_with(&runtime, Arc::clone(&transport));

        store.send_message("Hello mentor");
        assert_eq!(store.state().messages.len(), 1);
        assert_eq!(store.state().messages[0].role, Role::User);
        assert_eq!(store.state().messages[0].content, "Hello mentor");
        assert!(store.state().is_loading);

        settle(&mut store);
        let state = store.state();
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1].role, Role::Assistant);
        assert_eq!(state.messages[1].content, "Welcome!");
        assert_eq!(state.session_id.as_deref(), Some("s-1"));
        assert!(!state.is_loading);
        assert!(state.error.is_none());

        assert_eq!(
            transport.sent(),
            vec![SentCall {
                text: "Hello mentor".to_string(),
                prior: Vec::new(),
                session_id: None,
            }]
        );
    }

    #[test]
    fn follow_up_send_passes_prior_history_and_session() {
        let runtime = Runtime::new().expect("runtime should build");
        let transport = Arc::new(FakeTransport::replying("Sure.", Some("s-1")));
        let mut store = store_with(&runtime, Arc::clone(&transport));

        store.send_message("first");
        settle(&mut store);
        store.send_message("second");
        settle(&mut store);

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].prior, vec!["first".to_string(), "Sure.".to_string()]);
        assert_eq!(sent[1].session_id.as_deref(), Some("s-1"));
        assert_eq!(store.state().messages.len(), 4);
    }

    #[test]
    fn failed_send_keeps_user_message_and_reports_error() {
        let runtime = Runtime::new().expect("runtime should build");
        let transport = Arc::new(FakeTransport::failing("backend unavailable"));
        let mut store = store_with(&runtime, transport);

        store.send_message("Is anyone there?");
        settle(&mut store);

        let state = store.state();
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].role, Role::User);
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("backend unavailable"));
    }

    #[test]
    fn next_send_clears_previous_error() {
        let runtime = Runtime::new().expect("runtime should build");
        let transport = Arc::new(FakeTransport::failing("backend unavailable"));
        let mut store = store_with(&runtime, transport);

        store.send_message("one");
        settle(&mut store);
        assert!(store.state().error.is_some());

        store.send_message("two");
        assert!(store.state().error.is_none());
        assert_eq!(store.state().messages.len(), 2);
        settle(&mut store);
    }

    #[test]
    fn reset_clears_everything() {
        let runtime = Runtime::new().expect("runtime should build");
        let transport = Arc::new(FakeTransport::replying("ok", Some("s-1")));
        let mut store = store_with(&runtime, transport);

        store.send_message("hello");
        settle(&mut store);
        store.reset_chat();

        assert_eq!(store.state(), &ConversationState::default());
    }

    #[test]
    fn reply_arriving_after_reset_is_still_applied() {
        let runtime = Runtime::new().expect("runtime should build");
        let transport = Arc::new(FakeTransport::replying("late reply", None));
        let mut store = store_with(&runtime, transport);

        store.send_message("hello");
        store.reset_chat();
        assert!(store.state().messages.is_empty());

        settle(&mut store);
        let state = store.state();
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].content, "late reply");
    }

    #[test]
    fn load_history_replaces_messages_with_server_sequence() {
        let runtime = Runtime::new().expect("runtime should build");
        let server = vec![
            Message::user("When is the add/drop deadline?"),
            Message::assistant("Friday of week two.", None),
        ];
        let transport = Arc::new(FakeTransport::replying("local", None).with_history(server.clone()));
        let mut store = store_with(&runtime, Arc::clone(&transport));

        store.send_message("local question");
        settle(&mut store);

        store.load_history("abc-123");
        assert!(store.state().is_loading);
        settle(&mut store);

        let state = store.state();
        assert_eq!(state.messages, server);
        assert_eq!(state.session_id.as_deref(), Some("abc-123"));
        assert!(!state.is_loading);
        assert_eq!(transport.history_requests(), vec!["abc-123".to_string()]);
    }

    #[test]
    fn reply_metadata_is_kept_on_the_assistant_message() {
        let runtime = Runtime::new().expect("runtime should build");
        let mut metadata = Metadata::new();
        metadata.insert("agent".to_string(), json!("academic_advisor"));
        metadata.insert("confidence".to_string(), json!(0.9));
        let transport = Arc::new(
            FakeTransport::replying("Take CS 201 next.", Some("s-1"))
                .with_reply_metadata(metadata.clone()),
        );
        let mut store = store_with(&runtime, transport);

        store.send_message("What comes after CS 101?");
        settle(&mut store);

        let state = store.state();
        assert_eq!(state.messages.len(), 2);
        assert!(state.messages[0].metadata.is_none());
        assert_eq!(state.messages[1].role, Role::Assistant);
        assert_eq!(state.messages[1].metadata.as_ref(), Some(&metadata));
    }

    #[test]
    fn failed_history_load_keeps_current_messages() {
        let runtime = Runtime::new().expect("runtime should build");
        let transport = Arc::new(FakeTransport::failing("request failed with status 404: not found"));
        let mut store = store_with(&runtime, transport);

        store.send_message("keep me");
        settle(&mut store);

        store.load_history("missing");
        settle(&mut store);

        let state = store.state();
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].content, "keep me");
        assert!(state.session_id.is_none());
        assert_eq!(
            state.error.as_deref(),
            Some("request failed with status 404: not found")
        );
    }

    #[test]
    fn waker_runs_when_a_completion_is_queued() {
        let runtime = Runtime::new().expect("runtime should build");
        let transport = Arc::new(FakeTransport::replying("ok", None));
        let mut store = store_with(&runtime, transport);

        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        store.set_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.send_message("ping");
        settle(&mut store);
        for _ in 0..100 {
            if wakes.load(Ordering::SeqCst) > 0 {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drain_without_completions_reports_no_change() {
        let runtime = Runtime::new().expect("runtime should build");
        let mut store = store_with(&runtime, Arc::new(FakeTransport::replying("ok", None)));
        assert!(!store.drain_events());
    }
}
