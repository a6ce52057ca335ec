//! Global configuration types for NekoNet.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! default response mode, adapter timeouts, and the remote providers.

use serde::{Deserialize, Serialize};

use crate::provider::ProviderConfig;

/// Top-level configuration.
///
/// Loaded from `~/.neko/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Mode new sessions start in: `"local"` or a provider id.
    #[serde(default = "default_mode")]
    pub default_mode: String,

    /// Upper bound for a single adapter call, in milliseconds.
    #[serde(default = "default_adapter_timeout_ms")]
    pub adapter_timeout_ms: u64,

    /// Capacity of each session's event channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Remote providers and their mirror endpoints.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

fn default_mode() -> String {
    "local".to_string()
}

fn default_adapter_timeout_ms() -> u64 {
    8_000
}

fn default_event_capacity() -> usize {
    256
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
            adapter_timeout_ms: default_adapter_timeout_ms(),
            event_capacity: default_event_capacity(),
            providers: Vec::new(),
        }
    }
}
