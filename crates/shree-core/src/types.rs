//! Conversation domain types shared by the relay and the chat controller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::upstream::Part;

/// Tag the model appends once lead qualification is complete.
pub const LEAD_COMPLETE_MARKER: &str = "[LEAD_COMPLETE]";

/// Label that introduces the one-sentence requirement summary.
pub const SUMMARY_LABEL: &str = "Summary:";

// =============================================================================
// Role
// =============================================================================

/// Originator of a [`Turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The website visitor.
    User,
    /// The generation service speaking as the receptionist.
    Model,
}

// =============================================================================
// Language
// =============================================================================

/// Conversation language offered by the chat widget.
///
/// Serialized lowercase (`"english"`, `"gujarati"`, `"hindi"`). Parsing is
/// case-insensitive and an empty string falls back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Gujarati,
    Hindi,
}

impl Language {
    /// Every selectable language, in widget order.
    pub const ALL: [Language; 3] = [Language::English, Language::Gujarati, Language::Hindi];

    /// Wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Gujarati => "gujarati",
            Language::Hindi => "hindi",
        }
    }

    /// English name, used inside the persona instruction.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Gujarati => "Gujarati",
            Language::Hindi => "Hindi",
        }
    }

    /// Name in the language's own script, as shown on the selection buttons.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Gujarati => "ગુજરાતી",
            Language::Hindi => "हिंदी",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a language tag is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Language::English);
        }
        Language::ALL
            .into_iter()
            .find(|lang| {
                lang.as_str().eq_ignore_ascii_case(trimmed) || lang.native_name() == trimmed
            })
            .ok_or_else(|| UnknownLanguage(trimmed.to_string()))
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Turn
// =============================================================================

/// One message in a conversation.
///
/// Serializes as `{ "role", "text" }`. Deserialization also accepts the
/// upstream content shape `{ "role", "parts": [{ "text" }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TurnRepr")]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TurnRepr {
    Plain { role: Role, text: String },
    Content { role: Role, parts: Vec<Part> },
}

impl From<TurnRepr> for Turn {
    fn from(repr: TurnRepr) -> Self {
        match repr {
            TurnRepr::Plain { role, text } => Turn { role, text },
            TurnRepr::Content { role, parts } => Turn {
                role,
                text: parts.into_iter().map(|p| p.text).collect(),
            },
        }
    }
}

// =============================================================================
// ChatRequest
// =============================================================================

/// Body of `POST /api/chat`.
///
/// `history` is the transcript accumulated before `prompt`; the relay keeps
/// no conversation state, so callers resend it on every call. Missing or null
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<Turn>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: Language,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
