use thiserror::Error;

const BODY_SNIPPET_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Backend(String),
    #[error("invalid backend url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ChatError {
    pub fn status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = body.trim();
        let body = match body.char_indices().nth(BODY_SNIPPET_LEN) {
            Some((end, _)) => format!("{}...", &body[..end]),
            None => body.to_string(),
        };
        Self::Status {
            status: status.as_u16(),
            body,
        }
    }
}
