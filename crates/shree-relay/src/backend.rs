//! Upstream generation backends.
//!
//! [`GenerationBackend`] is the seam between the relay and the network:
//! production uses [`GeminiBackend`], tests substitute a stub.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use shree_core::config::UpstreamConfig;
use shree_core::GenerateContentRequest;

use crate::error::RelayError;

/// Performs one `generateContent` call and returns the response envelope.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, RelayError>;
}

/// reqwest-backed client for the Gemini `generateContent` endpoint.
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiBackend {
    /// Build a backend from upstream configuration.
    ///
    /// A `timeout_secs` of 0 leaves timeouts to the HTTP stack defaults.
    pub fn new(config: &UpstreamConfig) -> Result<Self, RelayError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Endpoint URL without the key query parameter.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, RelayError> {
        // reqwest errors embed the URL, which carries the key; strip it.
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| RelayError::InvalidResponse(e.without_url().to_string()))
    }
}
