//! Client-side conversation controller for the Shree chat widget.
//!
//! Holds one visitor's transcript, drives the stateless relay, detects the
//! lead-completion marker in replies and builds the messaging handoff link.

pub mod client;
pub mod controller;
pub mod error;
pub mod handoff;
pub mod parser;
pub mod response;
pub mod types;

pub use client::{HttpRelayClient, RelayClient};
pub use controller::ConversationController;
pub use error::ChatError;
pub use handoff::HandoffLink;
pub use parser::{parse_reply, LeadSummary, ParsedReply};
pub use response::reply_text;
pub use types::{ConversationState, Message};
