//! HTTP/REST API layer for NekoNet.
//!
//! Axum-based REST API at `/api/v1/` with the envelope response format,
//! SSE session events, and CORS support.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
