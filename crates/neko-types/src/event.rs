//! Orchestrator events for UI observers.
//!
//! Published on a broadcast bus whenever the session log or request state
//! changes. Serialized with a `type` tag so they can be forwarded verbatim
//! over SSE.

use serde::{Deserialize, Serialize};

use crate::chat::{Message, RequestStatus, ResponseMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A message was appended to the session log.
    MessageAppended { message: Message },

    /// The request status changed.
    StatusChanged { status: RequestStatus },

    /// The selected response mode changed.
    ModeChanged { mode: ResponseMode },

    /// The session log was cleared.
    SessionCleared,

    /// The session log was replaced by an imported snapshot.
    SessionRestored { message_count: usize },
}

impl ChatEvent {
    /// SSE event name for this variant.
    pub fn name(&self) -> &'static str {
        match self {
            ChatEvent::MessageAppended { .. } => "message_appended",
            ChatEvent::StatusChanged { .. } => "status_changed",
            ChatEvent::ModeChanged { .. } => "mode_changed",
            ChatEvent::SessionCleared => "session_cleared",
            ChatEvent::SessionRestored { .. } => "session_restored",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tagged_serialization() {
        let event = ChatEvent::StatusChanged {
            status: RequestStatus::Pending,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "status_changed");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_event_name_matches_tag() {
        let event = ChatEvent::SessionRestored { message_count: 2 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.name());
    }
}
