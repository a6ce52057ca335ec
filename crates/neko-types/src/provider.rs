//! Remote provider configuration and adapter error types.
//!
//! A provider is a named text-generation service reachable through one or
//! more mirror endpoints. Endpoint `order` defines the fallback sequence.

use serde::{Deserialize, Serialize};

/// One mirror endpoint of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    /// Position in the fallback sequence; lower is tried first.
    pub order: u32,
    /// Base URL the query is sent to with a GET request.
    pub url: String,
    /// Query-string parameter that carries the URL-encoded user query.
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Response fields to read, in precedence order.
    ///
    /// A plain name reads a top-level key; a name starting with `/` is a
    /// JSON pointer (e.g. `/choices/0/text`).
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
}

fn default_query_param() -> String {
    "q".to_string()
}

fn default_fields() -> Vec<String> {
    ["response", "answer", "text", "message", "result"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Configuration for a single named provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Identifier used to select the provider (e.g. "remote-b").
    pub id: String,
    /// Human-readable name for listings.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<ProviderEndpoint>,
}

impl ProviderConfig {
    /// Endpoints sorted by `order`; equal orders keep declaration order.
    pub fn sorted_endpoints(&self) -> Vec<&ProviderEndpoint> {
        let mut endpoints: Vec<&ProviderEndpoint> = self.endpoints.iter().collect();
        endpoints.sort_by_key(|e| e.order);
        endpoints
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Why a single adapter invocation failed.
///
/// Every variant is an adapter failure: the fallback executor moves on to
/// the next adapter regardless of which one occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("malformed response body: {0}")]
    Body(String),

    #[error("no non-empty field in response (tried {tried:?})")]
    MissingField { tried: Vec<String> },

    #[error("timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}
