//! Application state wiring the router, configuration, and live sessions.
//!
//! AppState is shared by the CLI commands and the REST API. The response
//! router (knowledge table, provider registry, fallback executor) is built
//! once and shared by every session; each session owns its own
//! `Orchestrator`.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::Instrument;
use uuid::Uuid;

use neko_core::chat::orchestrator::Orchestrator;
use neko_core::chat::router::ResponseRouter;
use neko_infra::config::{default_mode, load_global_config};
use neko_infra::filesystem::resolve_data_dir;
use neko_infra::llm::build_router;
use neko_observe::attrs;
use neko_types::chat::{Message, ResponseMode};
use neko_types::config::GlobalConfig;
use neko_types::error::OrchestratorError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GlobalConfig>,
    pub router: Arc<ResponseRouter>,
    pub data_dir: PathBuf,
    /// Mode new sessions start in when none is requested.
    pub default_mode: ResponseMode,
    /// Live REST API sessions.
    ///
    /// Clients own the lifetime: an entry stays until `DELETE
    /// /api/v1/sessions/{id}` or process exit, with no idle expiry.
    pub sessions: Arc<DashMap<Uuid, Arc<Orchestrator>>>,
}

impl AppState {
    /// Initialize the application state: resolve the data dir, load config,
    /// build the provider registry.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let router = build_router(&config);
        tracing::debug!(
            data_dir = %data_dir.display(),
            providers = router.registry().len(),
            "Application state initialized"
        );

        Ok(Self::new(config, router, data_dir))
    }

    /// Wire state from already-built parts.
    pub fn new(config: GlobalConfig, router: ResponseRouter, data_dir: PathBuf) -> Self {
        let default_mode = default_mode(&config);
        Self {
            config: Arc::new(config),
            router: Arc::new(router),
            data_dir,
            default_mode,
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// A fresh orchestrator over the shared router.
    pub fn new_orchestrator(&self, mode: ResponseMode) -> Arc<Orchestrator> {
        Arc::new(
            Orchestrator::new(self.router.clone(), mode)
                .with_event_capacity(self.config.event_capacity),
        )
    }

    /// Create and register a REST API session.
    pub fn create_session(&self, mode: ResponseMode) -> (Uuid, Arc<Orchestrator>) {
        let id = Uuid::now_v7();
        let orchestrator = self.new_orchestrator(mode);
        self.sessions.insert(id, orchestrator.clone());
        (id, orchestrator)
    }

    pub fn session(&self, id: &Uuid) -> Option<Arc<Orchestrator>> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Whether `mode` is local or names a registered provider.
    pub fn is_known_mode(&self, mode: &ResponseMode) -> bool {
        match mode {
            ResponseMode::Local => true,
            ResponseMode::Provider(id) => self.router.registry().contains(id),
        }
    }
}

/// Submit through `orchestrator` inside a `neko.submit` span.
pub async fn submit_traced(
    orchestrator: &Orchestrator,
    session_id: &str,
    text: &str,
) -> Result<Message, OrchestratorError> {
    let span = attrs::submit_span(session_id, orchestrator.mode().tag());
    let result = orchestrator.submit(text).instrument(span.clone()).await;
    if let Ok(message) = &result {
        span.record(attrs::RESPONSE_ROLE, message.role.to_string().as_str());
    }
    result
}
