//! ProviderAdapter trait definition.
//!
//! One adapter wraps exactly one remote endpoint. Uses RPITIT for `invoke`;
//! see `BoxProviderAdapter` for the object-safe wrapper.

use neko_types::provider::AdapterError;

/// A single endpoint of a remote text-generation provider.
///
/// `invoke` performs at most one outbound request and never retries;
/// retrying across mirrors is the job of the `FallbackExecutor`.
///
/// Implementations live in neko-infra (e.g., `HttpAdapter`).
pub trait ProviderAdapter: Send + Sync {
    /// Short label used in logs (usually the endpoint host).
    fn label(&self) -> &str;

    /// Send `query` to the endpoint and return the extracted answer text.
    fn invoke(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<String, AdapterError>> + Send;
}
