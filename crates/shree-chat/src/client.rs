//! Relay client used by the controller.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use shree_core::ChatRequest;

use crate::error::ChatError;

/// One call to the chat relay, returning the pass-through envelope.
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<Value, ChatError>;
}

#[async_trait]
impl<T: RelayClient + ?Sized> RelayClient for Arc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<Value, ChatError> {
        (**self).send(request).await
    }
}

#[derive(Deserialize)]
struct RelayErrorBody {
    error: String,
}

/// reqwest client for `POST {relay_url}/api/chat`.
pub struct HttpRelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(relay_url: &str) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ChatError::Relay(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/chat", relay_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, request: &ChatRequest) -> Result<Value, ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Relay(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<RelayErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            return Err(ChatError::RelayStatus {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ChatError::Relay(e.to_string()))
    }
}
