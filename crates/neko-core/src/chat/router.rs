//! Response routing between the local matcher and remote providers.

use neko_types::chat::{Message, ResponseMode};
use neko_types::error::{FallbackError, RouteError};
use neko_types::knowledge::ResponseSource;

use crate::knowledge::matcher::KnowledgeMatcher;
use crate::llm::fallback::FallbackExecutor;
use crate::llm::registry::ProviderRegistry;

/// A settled answer, ready to become an assistant message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// `local` or the provider id.
    pub provider_tag: String,
    /// Only set for local answers.
    pub confidence: Option<u8>,
    pub source: ResponseSource,
    /// Which mirror answered, for remote replies.
    pub adapter_index: Option<usize>,
}

impl Reply {
    pub fn into_message(self) -> Message {
        Message::assistant(self.text, self.provider_tag, self.confidence)
    }
}

/// Chooses between the knowledge matcher and a provider's fallback chain.
///
/// Stateless apart from its configuration; the at-most-one-in-flight rule is
/// enforced by the `Orchestrator` that owns it.
#[derive(Debug)]
pub struct ResponseRouter {
    matcher: KnowledgeMatcher,
    registry: ProviderRegistry,
    executor: FallbackExecutor,
}

impl ResponseRouter {
    pub fn new(
        matcher: KnowledgeMatcher,
        registry: ProviderRegistry,
        executor: FallbackExecutor,
    ) -> Self {
        Self {
            matcher,
            registry,
            executor,
        }
    }

    /// Router with the built-in table and no remote providers.
    pub fn local_only() -> Self {
        Self::new(
            KnowledgeMatcher::builtin(),
            ProviderRegistry::new(),
            FallbackExecutor::default(),
        )
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn matcher(&self) -> &KnowledgeMatcher {
        &self.matcher
    }

    /// Answer `query` using `mode`.
    ///
    /// Local mode always succeeds without touching the network.
    pub async fn respond(&self, mode: &ResponseMode, query: &str) -> Result<Reply, RouteError> {
        match mode {
            ResponseMode::Local => {
                let result = self.matcher.match_input(query);
                tracing::debug!(
                    topic = result.topic.as_deref().unwrap_or("default"),
                    confidence = result.confidence,
                    "Local match"
                );
                Ok(Reply {
                    text: result.text,
                    provider_tag: mode.tag().to_string(),
                    confidence: Some(result.confidence),
                    source: result.source,
                    adapter_index: None,
                })
            }
            ResponseMode::Provider(id) => {
                let chain = self
                    .registry
                    .chain(id)
                    .ok_or_else(|| RouteError::ProviderNotConfigured(id.clone()))?;

                match self.executor.run(chain, query).await {
                    Ok(result) => Ok(Reply {
                        text: result.text,
                        provider_tag: id.clone(),
                        confidence: None,
                        source: ResponseSource::Remote,
                        adapter_index: Some(result.adapter_index),
                    }),
                    Err(FallbackError::Exhausted { attempted }) => {
                        tracing::error!(provider = %id, attempted, "All provider endpoints failed");
                        Err(RouteError::AllProvidersExhausted {
                            provider: id.clone(),
                            attempted,
                        })
                    }
                }
            }
        }
    }
}
