use thiserror::Error;

/// Failures at the AI capability boundary.
///
/// None of these are fatal: callers keep their previous state and surface
/// the message inline.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI credential not configured: {0}")]
    NotConfigured(String),

    #[error("AI request failed: {0}")]
    Request(String),

    #[error("AI service returned status {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),
}

impl AiError {
    /// Configuration errors disable the feature; everything else is transient.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AiError::NotConfigured(_))
    }
}
