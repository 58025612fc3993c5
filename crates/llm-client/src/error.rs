use market_core::AiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not set")]
    NotConfigured,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type LlmResult<T> = Result<T, LlmError>;

impl From<LlmError> for AiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NotConfigured => AiError::NotConfigured("OPENAI_API_KEY".to_string()),
            LlmError::Config(msg) => AiError::NotConfigured(msg),
            LlmError::RequestFailed(e) => AiError::Request(e.to_string()),
            LlmError::Api { status, body } => AiError::RemoteStatus { status, body },
            LlmError::InvalidResponse(msg) => AiError::MalformedResponse(msg),
            LlmError::Serialization(e) => AiError::MalformedResponse(e.to_string()),
        }
    }
}
