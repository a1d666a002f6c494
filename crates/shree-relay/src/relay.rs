//! The relay itself: persona + transcript in, upstream envelope out.

use std::sync::Arc;

use serde_json::Value;

use shree_core::{ChatRequest, Content, GenerateContentRequest, Role};

use crate::backend::GenerationBackend;
use crate::error::RelayError;
use crate::persona::persona_instruction;

/// Stateless relay to a [`GenerationBackend`].
///
/// Holds no conversation state: every call carries the full transcript.
pub struct Relay {
    backend: Arc<dyn GenerationBackend>,
    api_key: Option<String>,
}

impl Relay {
    pub fn new(backend: Arc<dyn GenerationBackend>, api_key: Option<String>) -> Self {
        Self { backend, api_key }
    }

    /// Whether an upstream API key is available.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Forward one request upstream and return the response envelope unmodified.
    ///
    /// Fails with [`RelayError::MissingApiKey`] before any network call when no
    /// key is configured. Exactly one upstream attempt is made otherwise.
    pub async fn relay(&self, request: &ChatRequest) -> Result<Value, RelayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("Upstream API key is not configured");
            return Err(RelayError::MissingApiKey);
        };

        tracing::debug!(
            language = %request.language,
            history_len = request.history.len(),
            "Relaying chat request"
        );

        let upstream = build_upstream_request(request);
        self.backend
            .generate(api_key, &upstream)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Upstream generation failed"))
    }
}

/// Build the upstream request for `request`.
///
/// `contents` is the history followed by the prompt as a user turn; an empty
/// prompt is not appended.
pub fn build_upstream_request(request: &ChatRequest) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request.history.iter().map(Content::from).collect();
    if !request.prompt.is_empty() {
        contents.push(Content::text(Role::User, request.prompt.clone()));
    }

    GenerateContentRequest {
        contents,
        system_instruction: Content::text(Role::User, persona_instruction(request.language)),
    }
}
