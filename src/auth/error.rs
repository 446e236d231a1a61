use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("invalid url: {0}")]
    Url(String),
    #[error("transport failure")]
    Transport(#[from] reqwest::Error),
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("malformed response (status {status}): missing {field}")]
    MalformedResponse { status: u16, field: &'static str },
    #[error("envelope error: {0}")]
    Envelope(String),
    #[error("invalid digest pattern")]
    Pattern(#[source] regex::Error),
    #[error("token storage error")]
    Storage(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
