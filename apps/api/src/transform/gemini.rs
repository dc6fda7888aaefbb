//! Gemini-backed `TextTransform`. Wraps the generateContent endpoint with
//! retry on rate limits and transient server errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::transform::prompts;
use crate::transform::{strip_code_fence, TextTransform, TransformError};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all transform calls.
pub const MODEL: &str = "gemini-3-flash-preview";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    /// `api_key: None` builds a client whose every call fails with
    /// `Unconfigured` — the fallback when no key is set.
    pub fn new(api_key: Option<String>) -> GeminiClient {
        GeminiClient {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes a raw generateContent call and returns the concatenated text
    /// of the first candidate. Retries on 429 and 5xx with backoff.
    async fn call(&self, prompt: &str) -> Result<String, TransformError> {
        let api_key = self.api_key.as_deref().ok_or(TransformError::Unconfigured)?;

        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let url = format!("{}/{}:generateContent", self.base_url, MODEL);

        let mut last_error: Option<TransformError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Gemini call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .http
                .post(&url)
                .query(&[("key", api_key)])
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(TransformError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(TransformError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(TransformError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: GenerateResponse = response.json().await?;
            let text: String = parsed
                .candidates
                .first()
                .map(|c| {
                    c.content
                        .parts
                        .iter()
                        .map(|p| p.text.as_str())
                        .collect::<Vec<_>>()
                        .join("")
                })
                .unwrap_or_default();

            if text.trim().is_empty() {
                return Err(TransformError::EmptyContent);
            }

            debug!("Gemini call succeeded ({} chars)", text.len());
            return Ok(text);
        }

        Err(last_error.unwrap_or(TransformError::EmptyContent))
    }
}

#[async_trait]
impl TextTransform for GeminiClient {
    async fn polish(&self, text: &str) -> Result<String, TransformError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        let polished = self.call(&prompts::polish_prompt(text)).await?;
        Ok(polished.trim().to_string())
    }

    async fn translate(&self, fields: &Value, target_label: &str) -> Result<Value, TransformError> {
        let payload = serde_json::to_string(fields)?;
        let raw = self
            .call(&prompts::translate_prompt(&payload, target_label))
            .await?;
        let translated: Value = serde_json::from_str(strip_code_fence(&raw))?;
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient {
            http: reqwest::Client::new(),
            api_key: Some("test-key".to_string()),
            base_url: server.uri(),
        }
    }

    fn generate_response(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": text }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_polish_returns_trimmed_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/{MODEL}:generateContent")))
            .and(query_param("key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(generate_response("  Led a team of five.  ")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let polished = client.polish("I was leading some people").await.unwrap();
        assert_eq!(polished, "Led a team of five.");
    }

    #[tokio::test]
    async fn test_polish_of_empty_text_is_a_no_op() {
        // No mock server at all: empty input must not hit the network.
        let client = GeminiClient::new(Some("key".to_string()));
        assert_eq!(client.polish("   ").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_translate_strips_code_fences() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/{MODEL}:generateContent")))
            .respond_with(ResponseTemplate::new(200).set_body_json(generate_response(
                "```json\n{\"name\": \"戴夫\"}\n```",
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let out = client
            .translate(&json!({"name": "Dave"}), "简体中文 (Simplified Chinese)")
            .await
            .unwrap();
        assert_eq!(out, json!({"name": "戴夫"}));
    }

    #[tokio::test]
    async fn test_unconfigured_key_fails_fast() {
        let client = GeminiClient::new(None);
        let err = client.polish("some text").await.unwrap_err();
        assert!(matches!(err, TransformError::Unconfigured));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "API key not valid", "code": 400 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.polish("text").await.unwrap_err();
        match err {
            TransformError::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("API key not valid"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.polish("text").await.unwrap_err(),
            TransformError::EmptyContent
        ));
    }
}
