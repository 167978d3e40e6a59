use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::EnrichmentConfig;
use crate::error::{EnrichmentError, Result};
use crate::prompt::SPELLCHECK_SYSTEM_PROMPT;

/// Corrects spelling in a piece of text.
#[async_trait]
pub trait SpellChecker: Send + Sync {
    async fn correct(&self, text: &str) -> Result<String>;
}

/// Turns a piece of text into an embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Client for an OpenAI-compatible API, serving both collaborators.
///
/// Each call is a single request; retrying is left to the caller.
///
/// NOTE: Do NOT derive `Debug` on this struct, `api_key` would be exposed.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    spellcheck_model: String,
    embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiClient {
    pub fn new(config: &EnrichmentConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(EnrichmentError::ApiRequest)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base_url: config.api_base_url.clone(),
            spellcheck_model: config.spellcheck_model.clone(),
            embedding_model: config.embedding_model.clone(),
        })
    }

    /// POST a JSON body and decode the JSON reply.
    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{endpoint}", self.api_base_url);
        debug!(url = %url, "API request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body_text)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body_text);
            return Err(EnrichmentError::ApiError { status, message });
        }

        resp.json()
            .await
            .map_err(|e| EnrichmentError::ResponseParse(e.to_string()))
    }
}

#[async_trait]
impl SpellChecker for OpenAiClient {
    async fn correct(&self, text: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.spellcheck_model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: SPELLCHECK_SYSTEM_PROMPT.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: text.into(),
                },
            ],
        };

        let response: ChatResponse = self.post("/v1/chat/completions", &body).await?;
        let content = response
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .collect::<Vec<_>>()
            .join("");

        let content = content.trim();
        if content.is_empty() {
            return Err(EnrichmentError::EmptyResponse);
        }
        Ok(content.to_string())
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let body = EmbeddingRequest {
            model: &self.embedding_model,
            input: text,
        };

        let response: EmbeddingResponse = self.post("/v1/embeddings", &body).await?;
        match response.data.into_iter().next() {
            Some(data) if !data.embedding.is_empty() => Ok(data.embedding),
            _ => Err(EnrichmentError::EmptyResponse),
        }
    }
}

/// Test utilities for the collaborator clients.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::sync::Mutex;

    fn lock_poisoned(e: impl std::fmt::Display) -> EnrichmentError {
        EnrichmentError::ResponseParse(format!("mock lock poisoned: {e}"))
    }

    /// Mock spellchecker. Returns pre-configured responses in order, then
    /// echoes its input back once they run out.
    pub struct MockSpellChecker {
        responses: Mutex<Vec<Result<String>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockSpellChecker {
        pub fn new(responses: Vec<Result<String>>) -> Self {
            // Reverse so we can pop from the end
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// A spellchecker that returns every text unchanged.
        pub fn echo() -> Self {
            Self::new(Vec::new())
        }

        /// Texts received so far, in call order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl SpellChecker for MockSpellChecker {
        async fn correct(&self, text: &str) -> Result<String> {
            self.calls.lock().map_err(lock_poisoned)?.push(text.to_string());
            let mut responses = self.responses.lock().map_err(lock_poisoned)?;
            responses.pop().unwrap_or_else(|| Ok(text.to_string()))
        }
    }

    /// Mock embedder. Returns pre-configured responses in order, then a
    /// vector holding the input length once they run out.
    pub struct MockEmbedder {
        responses: Mutex<Vec<Result<Vec<f32>>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockEmbedder {
        pub fn new(responses: Vec<Result<Vec<f32>>>) -> Self {
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// An embedder that always succeeds.
        pub fn fixed() -> Self {
            Self::new(Vec::new())
        }

        /// An embedder whose first `times` calls fail.
        pub fn failing(times: usize) -> Self {
            Self::new((0..times).map(|_| Err(EnrichmentError::EmptyResponse)).collect())
        }

        /// Texts received so far, in call order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl Embedder for MockEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.lock().map_err(lock_poisoned)?.push(text.to_string());
            let mut responses = self.responses.lock().map_err(lock_poisoned)?;
            responses
                .pop()
                .unwrap_or_else(|| Ok(vec![text.chars().count() as f32]))
        }
    }
}
