//! Remote provider implementations.
//!
//! Contains the HTTP implementation of the [`ProviderAdapter`] trait defined
//! in `neko-core`, plus the factory functions that turn the `providers`
//! section of `config.toml` into a [`ProviderRegistry`] and a ready
//! [`ResponseRouter`].
//!
//! [`ProviderAdapter`]: neko_core::llm::adapter::ProviderAdapter

pub mod http_adapter;

use std::time::Duration;

use neko_core::chat::router::ResponseRouter;
use neko_core::knowledge::matcher::KnowledgeMatcher;
use neko_core::llm::box_adapter::BoxProviderAdapter;
use neko_core::llm::fallback::FallbackExecutor;
use neko_core::llm::registry::ProviderRegistry;
use neko_types::config::GlobalConfig;
use neko_types::provider::ProviderConfig;

use self::http_adapter::HttpAdapter;

/// Shared HTTP client for all adapters.
///
/// The per-adapter deadline is enforced by the `FallbackExecutor`; the
/// client only bounds connection setup.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .user_agent(concat!("neko/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to build configured HTTP client: {e}, using defaults");
            reqwest::Client::new()
        })
}

/// Build the provider registry from configuration.
///
/// Endpoints are ordered by their `order` field. An endpoint whose URL does
/// not parse is skipped with a warning; a provider left with no endpoints is
/// still registered, so selecting it reports exhaustion rather than
/// "not configured".
pub fn build_registry(providers: &[ProviderConfig], client: &reqwest::Client) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    for provider in providers {
        if provider.id.trim().is_empty() || provider.id.eq_ignore_ascii_case("local") {
            tracing::warn!(id = %provider.id, "Skipping provider with reserved or empty id");
            continue;
        }

        let adapters: Vec<BoxProviderAdapter> = provider
            .sorted_endpoints()
            .into_iter()
            .filter_map(|endpoint| match HttpAdapter::new(client.clone(), endpoint) {
                Ok(adapter) => Some(BoxProviderAdapter::new(adapter)),
                Err(e) => {
                    tracing::warn!(provider = %provider.id, "Skipping endpoint: {e}");
                    None
                }
            })
            .collect();

        tracing::debug!(
            provider = %provider.id,
            endpoints = adapters.len(),
            "Registered provider"
        );
        registry.register(provider.id.clone(), provider.display_name(), adapters);
    }

    registry
}

/// Build a router over the built-in knowledge table and the configured providers.
pub fn build_router(config: &GlobalConfig) -> ResponseRouter {
    let registry = build_registry(&config.providers, &http_client());
    let executor = FallbackExecutor::new(Duration::from_millis(config.adapter_timeout_ms));
    ResponseRouter::new(KnowledgeMatcher::builtin(), registry, executor)
}
