use crate::config::Config;
use crate::error::ChatError;
use crate::session::state::ChatReply;
use crate::session::Message;
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

pub mod wire;

use wire::SendRequest;

/// Backend calls the conversation store depends on.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(
        &self,
        text: &str,
        prior: &[Message],
        session_id: Option<&str>,
    ) -> Result<ChatReply, ChatError>;

    async fn get_history(&self, session_id: &str) -> Result<Vec<Message>, ChatError>;
}

/// HTTP client for the mentor backend rooted at `{api_url}/api`.
#[derive(Clone)]
pub struct ChatApi {
    base_url: Url,
    http: reqwest::Client,
}

impl ChatApi {
    pub fn new(config: &Config) -> Result<Self, ChatError> {
        let raw = format!("{}/api", config.api_url);
        let base_url = Url::parse(&raw).map_err(|err| ChatError::InvalidUrl {
            url: raw.clone(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ChatError::InvalidUrl {
                url: raw,
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_body(response: reqwest::Response) -> Result<String, ChatError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::status(status, &body));
        }
        Ok(body)
    }
}

#[async_trait]
impl ChatTransport for ChatApi {
    async fn send_message(
        &self,
        text: &str,
        prior: &[Message],
        session_id: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        let url = self.endpoint(&["chat", "send"]);
        debug!(%url, history = prior.len(), session_id, "posting chat message");

        let request = SendRequest::new(text, prior, session_id);
        let response = self.http.post(url).json(&request).send().await?;
        let body = Self::read_body(response).await?;
        wire::decode_send(&body)
    }

    async fn get_history(&self, session_id: &str) -> Result<Vec<Message>, ChatError> {
        let url = self.endpoint(&["chat", "history", session_id]);
        debug!(%url, "fetching chat history");

        let response = self.http.get(url).send().await?;
        let body = Self::read_body(response).await?;
        wire::decode_history(&body)
    }
}
