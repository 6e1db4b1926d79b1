//! Minimal OpenAI REST API client.
//!
//! Covers exactly what an extraction pipeline needs: chat completions
//! constrained to a JSON schema (the `json_schema` response format with
//! strict mode). No streaming, no tools, no domain logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::{OpenAiClient, StructuredRequest};
//!
//! let client = OpenAiClient::from_env()?.with_timeout(Duration::from_secs(60))?;
//! let request = StructuredRequest::new("gpt-4o-2024-08-06", system, user, schema);
//! let json_text = client.structured_output(request).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{LlmError, Result};
pub use types::{Message, StructuredRequest, Usage};

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// OpenAI API client.
#[derive(Clone)]
pub struct OpenAiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| LlmError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Apply a per-request timeout to the underlying HTTP client.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Config(e.to_string()))?;
        Ok(self)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a completion constrained to a JSON schema.
    ///
    /// Returns the raw JSON text of the model message; the caller owns
    /// deserialization and validation against its own contract.
    pub async fn structured_output(&self, request: StructuredRequest) -> Result<String> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                LlmError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(LlmError::Api(format!("OpenAI API error: {error_text}")));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            total_tokens = chat_response.usage.as_ref().map(|u| u.total_tokens),
            "OpenAI structured output"
        );

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Api("no response from OpenAI".into()))
    }
}
