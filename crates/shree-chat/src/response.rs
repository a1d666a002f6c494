//! Reading the reply text out of the relayed upstream envelope.

use serde_json::Value;

/// Shown when the envelope carries no reply text.
pub const UNCLEAR_REPLY: &str = "I apologize, I didn't catch that.";

/// Shown in place of a bot reply when the relay call fails.
pub const RELAY_FAILURE_REPLY: &str = "I apologize, I am having trouble connecting right now. Please call us directly at +91 74051 39990.";

/// Opening greeting used when the bootstrap call fails.
pub const FALLBACK_GREETING: &str =
    "Namaste! Welcome to Shree Real Estate. How can I help you today?";

/// Reply text at `candidates[0].content.parts[0].text`, or [`UNCLEAR_REPLY`]
/// when that path is missing, not a string, or empty.
pub fn reply_text(envelope: &Value) -> &str {
    envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .unwrap_or(UNCLEAR_REPLY)
}
