//! Reply post-processing: markup stripping, completion marker and summary.
//!
//! The model signals a finished qualification by ending its reply with
//! [`LEAD_COMPLETE_MARKER`] after a one-sentence `Summary:`. Nothing validates
//! that phrasing, so every step here degrades to a default instead of failing.

use regex::Regex;
use std::sync::LazyLock;

use shree_core::LEAD_COMPLETE_MARKER;

/// Used when a completed reply has no recognisable summary.
pub const DEFAULT_SUMMARY: &str = "Real Estate Inquiry";

/// Emphasis characters removed from every reply before display.
const MARKUP_CHARS: &[char] = &['*'];

/// Text after `Summary:` up to the next period, the word "Please", or the end
/// of the text. `.` does not cross line breaks.
static SUMMARY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Summary:(.*?)(?:\.|Please|$)").expect("Invalid summary regex")
});

/// Summary captured from a completed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSummary {
    pub text: String,
    /// False when [`DEFAULT_SUMMARY`] was substituted.
    pub matched: bool,
}

/// A bot reply ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Reply with markup and the completion marker removed.
    pub display_text: String,
    /// Present iff the completion marker was found.
    pub lead: Option<LeadSummary>,
}

impl ParsedReply {
    pub fn is_complete(&self) -> bool {
        self.lead.is_some()
    }
}

/// Remove emphasis markup characters.
pub fn strip_markup(text: &str) -> String {
    text.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect()
}

/// Parse a raw bot reply.
///
/// Markup is always stripped. When the marker is present its first occurrence
/// is removed, the text trimmed, and a summary extracted from what remains.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let cleaned = strip_markup(raw);

    if !cleaned.contains(LEAD_COMPLETE_MARKER) {
        return ParsedReply {
            display_text: cleaned,
            lead: None,
        };
    }

    let display_text = cleaned.replacen(LEAD_COMPLETE_MARKER, "", 1).trim().to_string();
    let lead = match extract_summary(&display_text) {
        Some(text) => LeadSummary {
            text,
            matched: true,
        },
        None => LeadSummary {
            text: DEFAULT_SUMMARY.to_string(),
            matched: false,
        },
    };

    ParsedReply {
        display_text,
        lead: Some(lead),
    }
}

/// Extract the trimmed summary sentence, if any.
pub fn extract_summary(text: &str) -> Option<String> {
    SUMMARY_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
