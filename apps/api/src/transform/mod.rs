//! Text transform collaborator — the single point of entry for all
//! generative-AI calls in the service. No other module talks to the
//! model API directly.
//!
//! Two operations: `polish` rewrites one prose field in place, and
//! `translate` maps a JSON object of prose fields into a target language
//! with keys and structure unchanged. Callers are responsible for never
//! putting protected fields (ids, dates, URLs, numbers) into the object
//! they hand to `translate`; the sync engine enforces that split.

pub mod gemini;
pub mod prompts;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("AI key is not configured")]
    Unconfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,
}

#[async_trait]
pub trait TextTransform: Send + Sync {
    /// Rewrites `text` for a professional portfolio, same language in/out.
    async fn polish(&self, text: &str) -> Result<String, TransformError>;

    /// Translates the string values of `fields` into the language named by
    /// `target_label`, returning an object of the same shape.
    async fn translate(&self, fields: &Value, target_label: &str) -> Result<Value, TransformError>;
}

/// Strips a wrapping markdown code fence (```json ... ``` or ``` ... ```)
/// that models sometimes add around structured output.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fence_with_language_tag() {
        let input = "```json\n{\"name\": \"Dave\"}\n```";
        assert_eq!(strip_code_fence(input), "{\"name\": \"Dave\"}");
    }

    #[test]
    fn test_strip_fence_without_tag() {
        let input = "```\n{\"name\": \"Dave\"}\n```";
        assert_eq!(strip_code_fence(input), "{\"name\": \"Dave\"}");
    }

    #[test]
    fn test_unfenced_text_passes_through() {
        assert_eq!(strip_code_fence("  plain text  "), "plain text");
    }
}
