//! Conversation orchestrator: the composition root of one session.
//!
//! Owns the session log and request state, enforces at most one in-flight
//! request, routes input through the `ResponseRouter`, and publishes every
//! state change on the session's `EventBus`.
//!
//! State lives behind a `std::sync::Mutex` that is never held across an
//! `.await`; the router call runs with the lock released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use neko_types::chat::{Message, RequestState, RequestStatus, ResponseMode, SessionSnapshot};
use neko_types::error::OrchestratorError;
use neko_types::event::ChatEvent;
use tokio::sync::broadcast;

use super::router::ResponseRouter;
use super::session::SessionStore;
use crate::event::EventBus;

struct Inner {
    session: SessionStore,
    request: RequestState,
    status: RequestStatus,
}

/// One conversation. Share it behind an `Arc`.
pub struct Orchestrator {
    router: Arc<ResponseRouter>,
    inner: Mutex<Inner>,
    events: EventBus,
}

impl Orchestrator {
    pub fn new(router: Arc<ResponseRouter>, mode: ResponseMode) -> Self {
        Self {
            router,
            inner: Mutex::new(Inner {
                session: SessionStore::new(),
                request: RequestState::new(mode),
                status: RequestStatus::Idle,
            }),
            events: EventBus::default(),
        }
    }

    /// Use a bus with the given channel capacity instead of the default.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.events = EventBus::new(capacity);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submit user input and wait for the settled reply.
    ///
    /// The user message is appended before dispatch. The returned message is
    /// the assistant answer or, when routing failed, the error-role message
    /// that was appended in its place. Empty input and submissions while a
    /// request is pending are rejected without touching the log.
    pub async fn submit(&self, text: &str) -> Result<Message, OrchestratorError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(OrchestratorError::InvalidInput);
        }

        let mode = {
            let mut inner = self.lock();
            if inner.request.pending {
                tracing::debug!("Rejecting submit while a request is pending");
                return Err(OrchestratorError::RequestPending);
            }
            inner.request.pending = true;
            inner.status = RequestStatus::Pending;
            let user = inner.session.append(Message::user(query)).clone();
            self.events.publish(ChatEvent::MessageAppended { message: user });
            self.events.publish(ChatEvent::StatusChanged {
                status: RequestStatus::Pending,
            });
            inner.request.selected_provider.clone()
        };

        let guard = PendingGuard::new(self);

        let (message, status) = match self.router.respond(&mode, query).await {
            Ok(reply) => {
                tracing::info!(
                    provider = %reply.provider_tag,
                    adapter_index = ?reply.adapter_index,
                    "Request settled"
                );
                (reply.into_message(), RequestStatus::Settled)
            }
            Err(e) => {
                tracing::warn!(mode = %mode, error = %e, "Request settled with error");
                (
                    Message::error(e.user_message(), Some(mode.tag().to_string())),
                    RequestStatus::Errored,
                )
            }
        };

        Ok(guard.settle(message, status))
    }

    /// Change the response mode for future submissions.
    ///
    /// Allowed while a request is pending; that request keeps the mode it
    /// was dispatched with.
    pub fn select_mode(&self, mode: ResponseMode) {
        let mut inner = self.lock();
        if inner.request.selected_provider == mode {
            return;
        }
        inner.request.selected_provider = mode.clone();
        self.events.publish(ChatEvent::ModeChanged { mode });
    }

    /// Empty the session log.
    pub fn clear(&self) -> Result<(), OrchestratorError> {
        let mut inner = self.lock();
        if inner.request.pending {
            return Err(OrchestratorError::RequestPending);
        }
        inner.session.clear();
        inner.status = RequestStatus::Idle;
        self.events.publish(ChatEvent::SessionCleared);
        self.events.publish(ChatEvent::StatusChanged {
            status: RequestStatus::Idle,
        });
        Ok(())
    }

    /// Replace the session log with an exported snapshot.
    ///
    /// The selected mode is left unchanged. Returns the number of restored
    /// messages.
    pub fn restore(&self, snapshot: SessionSnapshot) -> Result<usize, OrchestratorError> {
        let mut inner = self.lock();
        if inner.request.pending {
            return Err(OrchestratorError::RequestPending);
        }
        inner
            .session
            .load(snapshot)
            .map_err(|e| OrchestratorError::InvalidSnapshot(e.to_string()))?;
        let message_count = inner.session.len();
        self.events
            .publish(ChatEvent::SessionRestored { message_count });
        Ok(message_count)
    }

    /// Snapshot of the log attributed to the currently selected mode.
    pub fn export(&self) -> SessionSnapshot {
        let inner = self.lock();
        inner
            .session
            .serialize(inner.request.selected_provider.tag())
    }

    pub fn state(&self) -> RequestState {
        self.lock().request.clone()
    }

    pub fn status(&self) -> RequestStatus {
        self.lock().status
    }

    pub fn mode(&self) -> ResponseMode {
        self.lock().request.selected_provider.clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock().session.messages().to_vec()
    }

    pub fn message_count(&self) -> usize {
        self.lock().session.len()
    }

    pub fn router(&self) -> &ResponseRouter {
        &self.router
    }

    /// Subscribe to this session's events.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("Orchestrator")
            .field("request", &inner.request)
            .field("status", &inner.status)
            .field("messages", &inner.session.len())
            .finish()
    }
}

/// Clears the pending flag if a submit future is dropped mid-flight.
struct PendingGuard<'a> {
    orchestrator: &'a Orchestrator,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(orchestrator: &'a Orchestrator) -> Self {
        Self {
            orchestrator,
            armed: true,
        }
    }

    /// Append the settled message and release the pending flag in one step.
    fn settle(mut self, message: Message, status: RequestStatus) -> Message {
        let orch = self.orchestrator;
        let mut inner = orch.lock();
        let stored = inner.session.append(message).clone();
        inner.request.pending = false;
        inner.status = status;
        orch.events.publish(ChatEvent::MessageAppended {
            message: stored.clone(),
        });
        orch.events.publish(ChatEvent::StatusChanged { status });
        self.armed = false;
        stored
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let orch = self.orchestrator;
        let mut inner = orch.lock();
        inner.request.pending = false;
        inner.status = RequestStatus::Idle;
        tracing::debug!("Submit dropped before settling, pending cleared");
        orch.events.publish(ChatEvent::StatusChanged {
            status: RequestStatus::Idle,
        });
    }
}
