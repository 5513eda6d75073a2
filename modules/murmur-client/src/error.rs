use thiserror::Error;

pub type Result<T> = std::result::Result<T, MurmurError>;

#[derive(Debug, Error)]
pub enum MurmurError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for MurmurError {
    fn from(err: reqwest::Error) -> Self {
        MurmurError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for MurmurError {
    fn from(err: serde_json::Error) -> Self {
        MurmurError::Parse(err.to_string())
    }
}
