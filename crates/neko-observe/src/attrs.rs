//! Span names and attribute keys for request instrumentation.
//!
//! Keys use the `neko.` namespace so they group together once exported
//! through OpenTelemetry.

/// Span wrapping one `submit` from input to settled reply.
pub const SPAN_SUBMIT: &str = "neko.submit";

/// Session the request belongs to (`cli` for the interactive chat).
pub const SESSION_ID: &str = "neko.session.id";

/// Response mode the request was dispatched with (`local` or a provider id).
pub const RESPONSE_MODE: &str = "neko.response.mode";

/// Final role of the settled message (`assistant` or `error`).
pub const RESPONSE_ROLE: &str = "neko.response.role";

/// Create a submit span with the mode recorded and the role left empty.
///
/// Fill the role with `span.record(RESPONSE_ROLE, ..)` once the request settles.
pub fn submit_span(session_id: &str, mode: &str) -> tracing::Span {
    tracing::info_span!(
        SPAN_SUBMIT,
        neko.session.id = %session_id,
        neko.response.mode = %mode,
        neko.response.role = tracing::field::Empty,
    )
}
