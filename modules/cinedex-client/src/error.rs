use thiserror::Error;

pub type Result<T> = std::result::Result<T, CinedexError>;

#[derive(Debug, Error)]
pub enum CinedexError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CinedexError {
    fn from(err: reqwest::Error) -> Self {
        CinedexError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CinedexError {
    fn from(err: serde_json::Error) -> Self {
        CinedexError::Parse(err.to_string())
    }
}
