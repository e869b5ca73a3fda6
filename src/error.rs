use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed upstream response: {message}")]
    MalformedResponse { message: String },

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

impl PipelineError {
    /// True for failures of the upstream data call. These abort the run
    /// before any output is written.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, PipelineError::Http(_) | PipelineError::MalformedResponse { .. })
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        PipelineError::MalformedResponse { message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
