//! OpenAI-compatible chat-completion client behind the `AiAnalyst` capability.

pub mod error;
pub mod openai;
pub mod parse;
pub mod prompts;

pub use error::{LlmError, LlmResult};
pub use openai::OpenAiAnalyst;
pub use parse::{parse_assessment, parse_patch, strip_code_fences};

use std::time::Duration;

/// Value shipped in sample `.env` files; treated the same as no key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

/// Configuration for the completion endpoint
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl LlmConfig {
    /// Read `OPENAI_*` variables from the environment.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            timeout: Duration::from_secs(
                std::env::var("OPENAI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    /// A usable key: present, non-blank and not the placeholder.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> LlmConfig {
        LlmConfig {
            api_key: key.map(str::to_string),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_placeholder_and_blank_keys_are_unconfigured() {
        assert!(!config(None).is_configured());
        assert!(!config(Some("")).is_configured());
        assert!(!config(Some("   ")).is_configured());
        assert!(!config(Some(PLACEHOLDER_API_KEY)).is_configured());
        assert!(config(Some("sk-test")).is_configured());
    }
}
