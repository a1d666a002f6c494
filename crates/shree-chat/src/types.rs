//! Controller state and transcript entries.

use chrono::{DateTime, Local};
use serde::Serialize;

use shree_core::Turn;

/// Lifecycle of one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationState {
    /// No language chosen, no turns.
    Unselected,
    /// Language chosen; free-text input accepted.
    Active,
    /// Completion marker seen; only restart is possible.
    Completed,
}

/// A transcript entry as rendered by the widget.
///
/// Only `turn` is sent to the relay; `id` and `sent_at` are local.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: u64,
    pub turn: Turn,
    pub sent_at: DateTime<Local>,
}
