//! Turning completion text into typed results.

use market_core::{AiAssessment, CriteriaPatch};
use serde::de::DeserializeOwned;

use crate::error::{LlmError, LlmResult};

/// Remove a surrounding markdown code fence (with or without a language tag).
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn parse_object<T: DeserializeOwned>(content: &str) -> LlmResult<T> {
    let json = strip_code_fences(content);
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(LlmError::InvalidResponse(format!("expected a JSON object, got: {}", json)));
    }
    Ok(serde_json::from_value(value)?)
}

pub fn parse_patch(content: &str) -> LlmResult<CriteriaPatch> {
    parse_object(content)
}

pub fn parse_assessment(content: &str) -> LlmResult<AiAssessment> {
    let assessment: AiAssessment = parse_object(content)?;
    if assessment.insight.trim().is_empty() {
        return Err(LlmError::InvalidResponse("empty insight".to_string()));
    }
    Ok(assessment)
}
