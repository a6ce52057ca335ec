//! Session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions               - Create a session
//! - GET    /api/v1/sessions/{id}          - Request state and message count
//! - DELETE /api/v1/sessions/{id}          - Drop a session
//! - POST   /api/v1/sessions/{id}/messages - Submit user input, returns the settled reply
//! - GET    /api/v1/sessions/{id}/messages - Ordered session log
//! - PUT    /api/v1/sessions/{id}/mode     - Select the response mode
//! - POST   /api/v1/sessions/{id}/clear    - Clear the session log
//! - GET    /api/v1/sessions/{id}/export   - Export a snapshot
//! - POST   /api/v1/sessions/{id}/import   - Replace the log with a snapshot
//! - GET    /api/v1/sessions/{id}/events   - SSE stream of orchestrator events

use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Json;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tokio_stream::Stream;
use uuid::Uuid;

use neko_core::chat::orchestrator::Orchestrator;
use neko_infra::config::resolve_mode;
use neko_types::chat::{Message, RequestState, RequestStatus, ResponseMode, SessionSnapshot};
use neko_types::error::OrchestratorError;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::{AppState, submit_traced};

/// Optional body for session creation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// `local` or a provider id; the configured default when absent.
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: String,
}

/// Session summary returned by create/get/mode/clear.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: RequestState,
    pub status: RequestStatus,
    pub message_count: usize,
}

impl SessionView {
    fn new(id: Uuid, orchestrator: &Orchestrator) -> Self {
        Self {
            id,
            state: orchestrator.state(),
            status: orchestrator.status(),
            message_count: orchestrator.message_count(),
        }
    }
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

fn lookup(state: &AppState, session_id: &str) -> Result<(Uuid, Arc<Orchestrator>), AppError> {
    let id = parse_uuid(session_id)?;
    let orchestrator = state
        .session(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    Ok((id, orchestrator))
}

/// Resolve a requested mode, rejecting providers that were not registered.
fn requested_mode(state: &AppState, mode: &str) -> Result<ResponseMode, AppError> {
    let mode =
        resolve_mode(&state.config, mode).map_err(|e| AppError::Validation(e.to_string()))?;
    if !state.is_known_mode(&mode) {
        return Err(AppError::Validation(format!(
            "provider '{}' has no usable endpoints",
            mode.tag()
        )));
    }
    Ok(mode)
}

/// POST /api/v1/sessions - Create a session.
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let mode = match body.mode.as_deref() {
        Some(m) => requested_mode(&state, m)?,
        None => state.default_mode.clone(),
    };
    let (id, orchestrator) = state.create_session(mode);
    tracing::info!(session_id = %id, mode = %orchestrator.mode(), "Session created");

    let view = SessionView::new(id, &orchestrator);
    Ok(Json(
        ApiResponse::timed(view, start).with_link("self", &format!("/api/v1/sessions/{id}")),
    ))
}

/// GET /api/v1/sessions/{id} - Request state and message count.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let (id, orchestrator) = lookup(&state, &session_id)?;

    Ok(Json(
        ApiResponse::timed(SessionView::new(id, &orchestrator), start)
            .with_link("messages", &format!("/api/v1/sessions/{id}/messages"))
            .with_link("events", &format!("/api/v1/sessions/{id}/events")),
    ))
}

/// DELETE /api/v1/sessions/{id} - Drop a session.
///
/// An in-flight request finishes against the dropped orchestrator.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let id = parse_uuid(&session_id)?;

    state
        .sessions
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    tracing::info!(session_id = %id, "Session deleted");

    Ok(Json(ApiResponse::timed(
        serde_json::json!({ "deleted": true, "id": id }),
        start,
    )))
}

/// POST /api/v1/sessions/{id}/messages - Submit user input.
///
/// Waits for the request to settle and returns the appended assistant or
/// error message.
pub async fn submit_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<SubmitRequest>,
) -> Result<Json<ApiResponse<Message>>, AppError> {
    let start = Instant::now();
    let (id, orchestrator) = lookup(&state, &session_id)?;

    let reply = submit_traced(&orchestrator, &id.to_string(), &body.text).await?;

    Ok(Json(
        ApiResponse::timed(reply, start)
            .with_link("session", &format!("/api/v1/sessions/{id}")),
    ))
}

/// GET /api/v1/sessions/{id}/messages - Ordered session log.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Message>>>, AppError> {
    let start = Instant::now();
    let (id, orchestrator) = lookup(&state, &session_id)?;

    Ok(Json(
        ApiResponse::timed(orchestrator.messages(), start)
            .with_link("self", &format!("/api/v1/sessions/{id}/messages")),
    ))
}

/// PUT /api/v1/sessions/{id}/mode - Select the response mode.
///
/// Allowed while a request is pending; the in-flight request keeps the
/// mode it was dispatched with.
pub async fn set_mode(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<ModeRequest>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let (id, orchestrator) = lookup(&state, &session_id)?;

    let mode = requested_mode(&state, &body.mode)?;
    orchestrator.select_mode(mode);

    Ok(Json(ApiResponse::timed(SessionView::new(id, &orchestrator), start)))
}

/// POST /api/v1/sessions/{id}/clear - Clear the session log.
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let (id, orchestrator) = lookup(&state, &session_id)?;

    orchestrator.clear()?;

    Ok(Json(ApiResponse::timed(SessionView::new(id, &orchestrator), start)))
}

/// GET /api/v1/sessions/{id}/export - Export a snapshot.
pub async fn export_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, AppError> {
    let start = Instant::now();
    let (_, orchestrator) = lookup(&state, &session_id)?;

    Ok(Json(ApiResponse::timed(orchestrator.export(), start)))
}

/// POST /api/v1/sessions/{id}/import - Replace the log with a snapshot.
///
/// The body is the snapshot JSON as produced by export. Malformed JSON
/// and decreasing timestamps are both reported as `INVALID_SNAPSHOT`.
pub async fn import_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: String,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let (id, orchestrator) = lookup(&state, &session_id)?;

    let snapshot: SessionSnapshot = serde_json::from_str(&body)
        .map_err(|e| OrchestratorError::InvalidSnapshot(e.to_string()))?;
    let restored = orchestrator.restore(snapshot)?;
    tracing::info!(session_id = %id, messages = restored, "Session imported");

    Ok(Json(ApiResponse::timed(SessionView::new(id, &orchestrator), start)))
}

/// GET /api/v1/sessions/{id}/events - SSE stream of orchestrator events.
///
/// Each event is named after its variant (`message_appended`,
/// `status_changed`, ...) and carries the event as JSON. A subscriber that
/// falls behind receives a `lagged` event with the number of skipped events.
pub async fn session_events(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let (id, orchestrator) = lookup(&state, &session_id)?;
    let mut rx = orchestrator.subscribe();
    drop(orchestrator);

    let sse_stream = async_stream::stream! {
        yield Ok::<_, Infallible>(
            Event::default()
                .event("subscribed")
                .data(serde_json::json!({ "session_id": id }).to_string()),
        );

        loop {
            match rx.recv().await {
                Ok(event) => match Event::default().event(event.name()).json_data(&event) {
                    Ok(sse_event) => yield Ok(sse_event),
                    Err(e) => {
                        tracing::error!(
                            session_id = %id,
                            event = event.name(),
                            "Failed to encode event: {e}"
                        );
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(session_id = %id, skipped, "Event subscriber lagged");
                    yield Ok(Event::default()
                        .event("lagged")
                        .data(serde_json::json!({ "skipped": skipped }).to_string()));
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Ok(Sse::new(sse_stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}
