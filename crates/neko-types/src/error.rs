use thiserror::Error;

/// Aggregate failure of a fallback chain.
///
/// Individual adapter reasons are logged, not carried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackError {
    #[error("all adapters exhausted ({attempted} attempted)")]
    Exhausted { attempted: usize },
}

/// Terminal failures of the response router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("provider '{0}' is not configured")]
    ProviderNotConfigured(String),

    #[error("all endpoints of provider '{provider}' failed ({attempted} attempted)")]
    AllProvidersExhausted { provider: String, attempted: usize },
}

impl RouteError {
    /// Text shown to the user in the error-role message.
    pub fn user_message(&self) -> String {
        match self {
            RouteError::ProviderNotConfigured(id) => {
                format!(
                    "No provider named '{id}' is configured. \
                     Switch to local mode or pick another provider."
                )
            }
            RouteError::AllProvidersExhausted { provider, .. } => {
                format!(
                    "'{provider}' is unavailable right now: every mirror failed. \
                     Try again later or switch to local mode."
                )
            }
        }
    }
}

/// Operations rejected before anything is dispatched or changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    #[error("input is empty")]
    InvalidInput,

    #[error("a request is already pending")]
    RequestPending,

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Errors loading an exported session snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message {index} is older than the message before it")]
    NonMonotonicTimestamps { index: usize },
}
