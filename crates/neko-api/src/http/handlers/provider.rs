//! Provider listing handler.
//!
//! Endpoint:
//! - GET /api/v1/providers - Registered providers and their mirror labels

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::http::response::ApiResponse;
use crate::state::AppState;

/// One registered provider as exposed over the API.
#[derive(Debug, Serialize)]
pub struct ProviderSummary {
    pub id: String,
    pub name: String,
    /// Mirror labels in fallback order.
    pub endpoints: Vec<String>,
}

/// GET /api/v1/providers - List registered providers.
pub async fn list_providers(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<ProviderSummary>>> {
    let start = Instant::now();

    let providers = state
        .router
        .registry()
        .list()
        .iter()
        .map(|p| ProviderSummary {
            id: p.id.clone(),
            name: p.name.clone(),
            endpoints: p.adapters.iter().map(|a| a.label().to_string()).collect(),
        })
        .collect();

    Json(ApiResponse::timed(providers, start).with_link("self", "/api/v1/providers"))
}
