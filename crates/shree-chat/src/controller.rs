//! Conversation controller: the chat widget's state machine.
//!
//! Unselected -> Active (language chosen, greeting fetched)
//! Active -> Completed (reply carried the completion marker)
//! any -> Unselected (restart)
//!
//! The transcript lives here and is sent in full on every relay call.

use chrono::Local;

use shree_core::config::HandoffConfig;
use shree_core::{ChatRequest, Language, Turn};

use crate::client::RelayClient;
use crate::error::ChatError;
use crate::handoff::HandoffLink;
use crate::parser::parse_reply;
use crate::response::{reply_text, FALLBACK_GREETING, RELAY_FAILURE_REPLY};
use crate::types::{ConversationState, Message};

/// Hidden opening prompt that makes the model greet in the chosen language.
pub const BOOTSTRAP_PROMPT: &str = "Hello, I am interested in real estate.";

/// One visitor's conversation.
///
/// Mutating calls take `&mut self`, so at most one relay call is in flight.
pub struct ConversationController<C> {
    client: C,
    handoff_config: HandoffConfig,
    state: ConversationState,
    language: Option<Language>,
    messages: Vec<Message>,
    handoff: Option<HandoffLink>,
    next_id: u64,
}

impl<C: RelayClient> ConversationController<C> {
    pub fn new(client: C, handoff_config: HandoffConfig) -> Self {
        Self {
            client,
            handoff_config,
            state: ConversationState::Unselected,
            language: None,
            messages: Vec::new(),
            handoff: None,
            next_id: 1,
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The transcript as sent to the relay.
    pub fn history(&self) -> Vec<Turn> {
        self.messages.iter().map(|m| m.turn.clone()).collect()
    }

    /// Whether free-text input is accepted.
    pub fn input_enabled(&self) -> bool {
        self.state == ConversationState::Active
    }

    /// Handoff link, once the conversation is completed.
    pub fn handoff(&self) -> Option<&HandoffLink> {
        self.handoff.as_ref()
    }

    /// Start a conversation in `language` and fetch the greeting.
    ///
    /// Discards any previous transcript. Makes one relay call with
    /// [`BOOTSTRAP_PROMPT`] and no history; the prompt itself is not recorded.
    /// A failed call falls back to [`FALLBACK_GREETING`]. The greeting never
    /// completes the conversation.
    pub async fn select_language(&mut self, language: Language) -> &Message {
        self.reset();
        self.language = Some(language);
        self.state = ConversationState::Active;

        let request = ChatRequest {
            prompt: BOOTSTRAP_PROMPT.to_string(),
            history: Vec::new(),
            language,
        };
        let greeting = match self.client.send(&request).await {
            Ok(envelope) => parse_reply(reply_text(&envelope)).display_text,
            Err(e) => {
                tracing::warn!(error = %e, language = %language, "Greeting request failed");
                FALLBACK_GREETING.to_string()
            }
        };

        self.push(Turn::model(greeting))
    }

    /// Send one visitor message and record the reply.
    ///
    /// The relay receives the transcript as it was before `text`. On failure
    /// the apology reply is recorded instead; the error is not returned.
    pub async fn submit(&mut self, text: &str) -> Result<&Message, ChatError> {
        let language = match self.state {
            ConversationState::Unselected => return Err(ChatError::NoLanguage),
            ConversationState::Completed => return Err(ChatError::InputDisabled),
            ConversationState::Active => self.language.ok_or(ChatError::NoLanguage)?,
        };
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let request = ChatRequest {
            prompt: text.to_string(),
            history: self.history(),
            language,
        };
        self.push(Turn::user(text));

        let reply = match self.client.send(&request).await {
            Ok(envelope) => {
                let parsed = parse_reply(reply_text(&envelope));
                if let Some(lead) = parsed.lead {
                    if !lead.matched {
                        tracing::debug!("Completion marker without a summary; using default");
                    }
                    tracing::info!(language = %language, "Lead qualification completed");
                    self.handoff = Some(HandoffLink::for_summary(&self.handoff_config, &lead.text));
                    self.state = ConversationState::Completed;
                }
                parsed.display_text
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat relay request failed");
                RELAY_FAILURE_REPLY.to_string()
            }
        };

        Ok(self.push(Turn::model(reply)))
    }

    /// Return to Unselected, discarding all turns.
    pub fn restart(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = ConversationState::Unselected;
        self.language = None;
        self.messages.clear();
        self.handoff = None;
    }

    fn push(&mut self, turn: Turn) -> &Message {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            turn,
            sent_at: Local::now(),
        });
        &self.messages[self.messages.len() - 1]
    }
}
