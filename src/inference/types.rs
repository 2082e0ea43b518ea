use serde::{Deserialize, Serialize};

/// Who authored a message on the wire. The generative-language API calls the
/// assistant side "model".
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "model")]
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// A single role-tagged message in the outbound history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
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

/// A grounding source attached to a completion.
///
/// Either field may be missing; empty strings are normalized to `None` by the
/// providers so downstream code only has to check for presence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Citation {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl Citation {
    pub fn new(uri: Option<&str>, title: Option<&str>) -> Self {
        Self {
            uri: non_blank(uri),
            title: non_blank(title),
        }
    }
}

/// Converts an empty or whitespace-only string to None.
pub(crate) fn non_blank(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty()).map(str::to_string)
}

/// Everything a provider needs to fulfill a completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    /// Prior transcript followed by the new user message, oldest first.
    pub messages: Vec<Message>,
    /// Sent as out-of-band configuration, never as a transcript message.
    pub system_instruction: String,
    /// Enables the provider's search grounding tool.
    pub grounding: bool,
}

/// A finished completion: primary text plus any grounding citations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub text: String,
    pub citations: Vec<Citation>,
}
