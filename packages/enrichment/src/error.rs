use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("failed to parse API response: {0}")]
    ResponseParse(String),

    #[error("API returned empty response")]
    EmptyResponse,

    #[error("{label} failed after {attempts} attempts: {message}")]
    RetriesExhausted {
        label: String,
        attempts: u32,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

pub type Result<T> = std::result::Result<T, EnrichmentError>;
