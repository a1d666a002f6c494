//! End-to-end conversation tests: controller -> HTTP relay -> stub upstream.
//!
//! The relay router runs on a local port with a scripted generation backend,
//! so the full request path is exercised without network access.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use shree_chat::{ConversationController, ConversationState, HttpRelayClient};
use shree_core::config::HandoffConfig;
use shree_core::{GenerateContentRequest, Language, Role, ShreeConfig};
use shree_relay::{create_router, AppState, GenerationBackend, Relay, RelayError};

// =============================================================================
// Helpers
// =============================================================================

/// Returns scripted model replies in order and records what it was sent.
struct ScriptedBackend {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
}

impl ScriptedBackend {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(
        &self,
        _api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, RelayError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(text) => Ok(json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
            })),
            None => Err(RelayError::Upstream {
                status: 503,
                body: "script exhausted".to_string(),
            }),
        }
    }
}

async fn spawn_relay(backend: Arc<ScriptedBackend>, api_key: Option<&str>) -> String {
    let relay = Relay::new(backend, api_key.map(str::to_string));
    let router = create_router(AppState::new(ShreeConfig::default(), relay));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

// =============================================================================
// Flows
// =============================================================================

#[tokio::test]
async fn test_full_qualification_flow() {
    let backend = ScriptedBackend::new(&[
        "**Namaste!** I am Anjali. Are you looking for a showroom or an office?",
        "Great. Which area of Surat?",
        "What is your budget?",
        "Summary: Office in Vesu, budget 50L. Please click the button below to connect with our senior team directly on WhatsApp for floor plans and more details. [LEAD_COMPLETE]",
    ]);
    let url = spawn_relay(backend.clone(), Some("test-key")).await;
    let client = HttpRelayClient::new(&url).unwrap();
    let mut ctl = ConversationController::new(client, HandoffConfig::default());

    let greeting = ctl.select_language(Language::English).await;
    assert_eq!(
        greeting.turn.text,
        "Namaste! I am Anjali. Are you looking for a showroom or an office?"
    );

    ctl.submit("Office").await.unwrap();
    ctl.submit("Vesu").await.unwrap();
    ctl.submit("Around 50 lakh").await.unwrap();

    assert_eq!(ctl.state(), ConversationState::Completed);
    assert_eq!(ctl.messages().len(), 7);
    let link = ctl.handoff().unwrap();
    assert!(link.url().starts_with("https://wa.me/917405139990?text="));
    assert!(link.message().contains("Office in Vesu, budget 50L"));

    // One upstream call per submission plus the greeting, each carrying the
    // transcript as it stood before that submission.
    let requests = backend.requests.lock().unwrap();
    assert_eq!(requests.len(), 4);
    let lengths: Vec<usize> = requests.iter().map(|r| r.contents.len()).collect();
    assert_eq!(lengths, vec![1, 2, 4, 6]);
    let last = &requests[3];
    assert_eq!(last.contents[0].role, Role::Model);
    assert_eq!(last.contents[5].parts[0].text, "Around 50 lakh");
    assert!(last.system_instruction.parts[0]
        .text
        .contains("You MUST converse in English."));
}

#[tokio::test]
async fn test_language_reaches_persona() {
    let backend = ScriptedBackend::new(&["નમસ્તે!"]);
    let url = spawn_relay(backend.clone(), Some("test-key")).await;
    let mut ctl = ConversationController::new(
        HttpRelayClient::new(&url).unwrap(),
        HandoffConfig::default(),
    );

    ctl.select_language(Language::Gujarati).await;

    let requests = backend.requests.lock().unwrap();
    assert!(requests[0].system_instruction.parts[0]
        .text
        .contains("You MUST converse in Gujarati."));
}

#[tokio::test]
async fn test_missing_key_degrades_to_fallbacks() {
    let backend = ScriptedBackend::new(&["never sent"]);
    let url = spawn_relay(backend.clone(), None).await;
    let mut ctl = ConversationController::new(
        HttpRelayClient::new(&url).unwrap(),
        HandoffConfig::default(),
    );

    let greeting = ctl.select_language(Language::Hindi).await;
    assert_eq!(greeting.turn.text, shree_chat::response::FALLBACK_GREETING);

    let reply = ctl.submit("Showroom").await.unwrap();
    assert_eq!(reply.turn.text, shree_chat::response::RELAY_FAILURE_REPLY);
    assert_eq!(ctl.state(), ConversationState::Active);
    assert!(backend.requests.lock().unwrap().is_empty());
}
