//! Gemini `generateContent` client.
//!
//! One POST per completion with the transport's default timeouts. The model
//! identifier is fixed at construction; callers get no sampling knobs.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::completion::{CompletionBackend, errors::CompletionError};
use crate::config::Config;

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Build the process-wide client from startup configuration. The
    /// credential was already validated by `Config::from_env`, so this can
    /// never panic at module load time.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_api_key(),
            config.gemini_base_url(),
            config.gemini_model(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let start = std::time::Instant::now();

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "completion request failed");
                CompletionError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, message = %message, "completion provider error");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or(CompletionError::Empty)?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            chars = text.len(),
            "completion finished"
        );

        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test-key", server.uri(), "gemini-1.5-flash-latest")
    }

    #[tokio::test]
    async fn concatenates_candidate_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash-latest:generateContent"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"parts": [{"text": "Hello "}, {"text": "world"}]}
                }]
            })))
            .mount(&server)
            .await;

        let text = client_for(&server).complete("prompt").await.unwrap();
        assert_eq!(text, "Hello world");
    }

    #[tokio::test]
    async fn provider_error_body_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string("quota exhausted for this model"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).complete("prompt").await.unwrap_err();
        match err {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "quota exhausted for this model");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_candidates_are_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("prompt").await.unwrap_err();
        assert!(matches!(err, CompletionError::Empty));
    }

    #[tokio::test]
    async fn sends_prompt_in_request_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(wiremock::matchers::body_partial_json(json!({
                "contents": [{"parts": [{"text": "the built prompt"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
            })))
            .mount(&server)
            .await;

        let text = client_for(&server).complete("the built prompt").await.unwrap();
        assert_eq!(text, "ok");
    }
}
