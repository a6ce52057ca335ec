//! Chat message, session snapshot, and request state types for NekoNet.
//!
//! These types model a single conversation: the ordered messages exchanged
//! with the orchestrator, the exported snapshot of that log, and the
//! request state the UI observes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role tag of a message in the session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    Error,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::Error => write!(f, "error"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "error" => Ok(MessageRole::Error),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a session.
///
/// Immutable once appended to a session. `provider_tag` attributes
/// assistant and error messages to `local` or a remote provider id;
/// `confidence` is only set for answers produced by the knowledge matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

impl Message {
    /// A user message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            provider_tag: None,
            confidence: None,
        }
    }

    /// An assistant message attributed to `provider_tag`.
    pub fn assistant(
        content: impl Into<String>,
        provider_tag: impl Into<String>,
        confidence: Option<u8>,
    ) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            provider_tag: Some(provider_tag.into()),
            confidence,
        }
    }

    /// An error-classified message, optionally attributed to the provider that failed.
    pub fn error(content: impl Into<String>, provider_tag: Option<String>) -> Self {
        Self {
            role: MessageRole::Error,
            content: content.into(),
            timestamp: Utc::now(),
            provider_tag,
            confidence: None,
        }
    }
}

/// Which responder a request is routed to.
///
/// Serialized as a plain string: `"local"` or the provider id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ResponseMode {
    /// Answer from the knowledge matcher, no network.
    #[default]
    Local,
    /// Delegate to the named remote provider.
    Provider(String),
}

impl ResponseMode {
    /// The attribution tag used on messages produced in this mode.
    pub fn tag(&self) -> &str {
        match self {
            ResponseMode::Local => "local",
            ResponseMode::Provider(id) => id,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, ResponseMode::Local)
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ResponseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("response mode must not be empty".to_string());
        }
        if trimmed.eq_ignore_ascii_case("local") {
            Ok(ResponseMode::Local)
        } else {
            Ok(ResponseMode::Provider(trimmed.to_string()))
        }
    }
}

impl From<ResponseMode> for String {
    fn from(mode: ResponseMode) -> Self {
        mode.tag().to_string()
    }
}

impl TryFrom<String> for ResponseMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Observable request state of an orchestrator.
///
/// At most one request may be pending at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestState {
    pub pending: bool,
    pub selected_provider: ResponseMode,
}

impl RequestState {
    pub fn new(selected_provider: ResponseMode) -> Self {
        Self {
            pending: false,
            selected_provider,
        }
    }
}

/// UI-facing lifecycle status of the most recent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Nothing has been submitted yet, or the session was cleared.
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request settled with an assistant message.
    Settled,
    /// The last request settled with an error message.
    Errored,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Idle => write!(f, "idle"),
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Settled => write!(f, "settled"),
            RequestStatus::Errored => write!(f, "errored"),
        }
    }
}

/// Portable export of a session log.
///
/// Serialized as `{ "messages": [...], "exportedAt": "...", "providerId": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub exported_at: DateTime<Utc>,
    pub provider_id: String,
}
