use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, RemoteError>;

impl RemoteError {
    /// True for 4xx answers, where the server rejected what we sent.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RemoteError::Status { status, .. } if (400..500).contains(status))
    }
}
