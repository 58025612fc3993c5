//! OpenAI chat-completions implementation of `AiAnalyst`.

use async_trait::async_trait;
use market_core::{AiAnalyst, AiAssessment, AiError, CriteriaPatch, FilterCriteria, Security};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::{LlmError, LlmResult};
use crate::parse::{parse_assessment, parse_patch};
use crate::prompts::{analysis_prompt, filter_prompt, ANALYSIS_TEMPERATURE, FILTER_SYSTEM_PROMPT, FILTER_TEMPERATURE};
use crate::LlmConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Completion-backed analyst. Without a usable key every call fails with
/// `NotConfigured` before any request is built.
#[derive(Clone)]
pub struct OpenAiAnalyst {
    client: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiAnalyst {
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = config.api_key() {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| LlmError::Config(format!("API key is not a valid header value: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> LlmResult<Self> {
        Self::new(LlmConfig::from_env())
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn complete(&self, messages: Vec<ChatMessage<'_>>, temperature: f32) -> LlmResult<String> {
        if !self.config.is_configured() {
            return Err(LlmError::NotConfigured);
        }

        let start = Instant::now();
        let url = format!("{}/v1/chat/completions", self.config.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        tracing::debug!(
            model = %self.config.model,
            latency_ms = start.elapsed().as_millis() as u64,
            "Chat completion finished"
        );

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("no message content in response".to_string()))
    }
}

#[async_trait]
impl AiAnalyst for OpenAiAnalyst {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn suggest_filters(&self, query: &str, current: &FilterCriteria) -> Result<CriteriaPatch, AiError> {
        let prompt = filter_prompt(query, current);
        let messages = vec![
            ChatMessage {
                role: "system",
                content: FILTER_SYSTEM_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: &prompt,
            },
        ];

        let content = self.complete(messages, FILTER_TEMPERATURE).await?;
        let patch = parse_patch(&content)?;
        tracing::info!(query, ?patch, "Interpreted filter query");
        Ok(patch)
    }

    async fn analyze(&self, security: &Security) -> Result<AiAssessment, AiError> {
        let prompt = analysis_prompt(security);
        let messages = vec![ChatMessage {
            role: "user",
            content: &prompt,
        }];

        let content = self.complete(messages, ANALYSIS_TEMPERATURE).await?;
        let assessment = parse_assessment(&content)?;
        tracing::info!(symbol = %security.symbol, health = assessment.health.as_str(), "AI analysis complete");
        Ok(assessment)
    }

    fn backend_name(&self) -> &'static str {
        "openai"
    }
}
