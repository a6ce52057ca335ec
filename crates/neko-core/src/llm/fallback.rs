//! Sequential fallback over the mirrors of one provider.
//!
//! Adapters are tried strictly in order, each at most once, stopping at the
//! first success. Individual failures are logged and swallowed; the caller
//! only ever sees the winning answer or one aggregate failure.

use std::time::{Duration, Instant};

use neko_types::error::FallbackError;
use neko_types::provider::AdapterError;

use super::box_adapter::BoxProviderAdapter;

/// Default upper bound for a single adapter call.
pub const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_millis(8_000);

/// Result of a successful run through the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackResult {
    /// The answer text from the winning adapter.
    pub text: String,
    /// Position of the winning adapter in the chain.
    pub adapter_index: usize,
    /// Label of the winning adapter.
    pub label: String,
}

/// Runs an ordered adapter chain with a per-adapter timeout.
#[derive(Debug, Clone)]
pub struct FallbackExecutor {
    timeout: Duration,
}

impl FallbackExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Try each adapter in order until one answers.
    ///
    /// A timeout counts as a failure of that adapter. An empty chain fails
    /// immediately with `attempted: 0`.
    pub async fn run(
        &self,
        adapters: &[BoxProviderAdapter],
        query: &str,
    ) -> Result<FallbackResult, FallbackError> {
        for (index, adapter) in adapters.iter().enumerate() {
            let label = adapter.label();
            tracing::debug!(adapter = %label, index, "Invoking adapter");

            let start = Instant::now();
            let outcome = match tokio::time::timeout(self.timeout, adapter.invoke(query)).await {
                Ok(result) => result,
                Err(_) => Err(AdapterError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                }),
            };
            let latency_ms = start.elapsed().as_millis() as u64;

            match outcome {
                Ok(text) => {
                    if index > 0 {
                        tracing::info!(
                            adapter = %label,
                            index,
                            latency_ms,
                            "Answered by fallback adapter"
                        );
                    }
                    return Ok(FallbackResult {
                        text,
                        adapter_index: index,
                        label: label.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        adapter = %label,
                        index,
                        latency_ms,
                        error = %e,
                        "Adapter failed, trying next"
                    );
                }
            }
        }

        Err(FallbackError::Exhausted {
            attempted: adapters.len(),
        })
    }
}

impl Default for FallbackExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_ADAPTER_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::adapter::ProviderAdapter;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock adapter that counts invocations and returns a fixed outcome.
    struct MockAdapter {
        label: String,
        outcome: Result<String, AdapterError>,
        calls: Arc<AtomicUsize>,
    }

    impl MockAdapter {
        fn ok(label: &str, text: &str) -> (Self, Arc<AtomicUsize>) {
            Self::with(label, Ok(text.to_string()))
        }

        fn failing(label: &str) -> (Self, Arc<AtomicUsize>) {
            Self::with(label, Err(AdapterError::Status { status: 500 }))
        }

        fn with(label: &str, outcome: Result<String, AdapterError>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let adapter = Self {
                label: label.to_string(),
                outcome,
                calls: calls.clone(),
            };
            (adapter, calls)
        }
    }

    impl ProviderAdapter for MockAdapter {
        fn label(&self) -> &str {
            &self.label
        }

        async fn invoke(&self, _query: &str) -> Result<String, AdapterError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    /// Adapter that never answers within any reasonable timeout.
    struct StalledAdapter;

    impl ProviderAdapter for StalledAdapter {
        fn label(&self) -> &str {
            "stalled"
        }

        async fn invoke(&self, _query: &str) -> Result<String, AdapterError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_third_adapter_wins_after_two_failures() {
        let (a, a_calls) = MockAdapter::failing("a");
        let (b, b_calls) = MockAdapter::failing("b");
        let (c, c_calls) = MockAdapter::ok("c", "x");
        let chain = vec![
            BoxProviderAdapter::new(a),
            BoxProviderAdapter::new(b),
            BoxProviderAdapter::new(c),
        ];

        let result = FallbackExecutor::default().run(&chain, "q").await.unwrap();

        assert_eq!(result.text, "x");
        assert_eq!(result.adapter_index, 2);
        assert_eq!(result.label, "c");
        for calls in [a_calls, b_calls, c_calls] {
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_stops_at_first_success() {
        let (a, a_calls) = MockAdapter::ok("a", "first");
        let (b, b_calls) = MockAdapter::ok("b", "second");
        let chain = vec![BoxProviderAdapter::new(a), BoxProviderAdapter::new(b)];

        let result = FallbackExecutor::default().run(&chain, "q").await.unwrap();

        assert_eq!(result.text, "first");
        assert_eq!(result.adapter_index, 0);
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_failing_is_one_aggregate_error() {
        let (a, a_calls) = MockAdapter::failing("a");
        let (b, b_calls) = MockAdapter::with(
            "b",
            Err(AdapterError::MissingField {
                tried: vec!["response".to_string()],
            }),
        );
        let (c, c_calls) = MockAdapter::with("c", Err(AdapterError::Transport("refused".into())));
        let chain = vec![
            BoxProviderAdapter::new(a),
            BoxProviderAdapter::new(b),
            BoxProviderAdapter::new(c),
        ];

        let err = FallbackExecutor::default().run(&chain, "q").await.unwrap_err();

        assert_eq!(err, FallbackError::Exhausted { attempted: 3 });
        for calls in [a_calls, b_calls, c_calls] {
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_empty_chain_fails() {
        let err = FallbackExecutor::default().run(&[], "q").await.unwrap_err();
        assert_eq!(err, FallbackError::Exhausted { attempted: 0 });
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        let (b, b_calls) = MockAdapter::ok("b", "fast");
        let chain = vec![BoxProviderAdapter::new(StalledAdapter), BoxProviderAdapter::new(b)];
        let executor = FallbackExecutor::new(Duration::from_millis(20));

        let result = executor.run(&chain, "q").await.unwrap();

        assert_eq!(result.text, "fast");
        assert_eq!(result.adapter_index, 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    }
}
