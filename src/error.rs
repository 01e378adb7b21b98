use thiserror::Error;

pub type Result<T> = std::result::Result<T, GuardError>;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Invalid extension ID or URL: {0}")]
    InvalidId(String),

    #[error("Chrome Web Store returned HTTP {0}")]
    FetchFailed(u16),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Manifest error in {file}: {message}")]
    Manifest { file: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GuardError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl From<reqwest::Error> for GuardError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => GuardError::FetchFailed(status.as_u16()),
            None => GuardError::Fetch(e.to_string()),
        }
    }
}
