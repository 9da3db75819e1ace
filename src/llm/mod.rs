//! Hosted language model access.
//!
//! The rest of the crate talks to the model through [`LlmClient`] so handlers
//! and tests can swap the hosted client for a stub.

mod gemini;

pub use gemini::*;

use async_trait::async_trait;
use thiserror::Error;

/// LLM request payload
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub temperature: f32,
}

/// LLM client trait
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model name requests should target.
    fn model(&self) -> &str;

    async fn complete(&self, request: LlmRequest) -> Result<String, LlmError>;
}

/// LLM errors
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(String),
    #[error("response error: {0}")]
    Response(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The outermost `{...}` span of a model reply, dropping prose and fences.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Shorten model input/output for log lines.
pub fn truncate_for_log(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let mut out: String = input.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
