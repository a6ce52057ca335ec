//! Remote provider abstractions.
//!
//! - `ProviderAdapter`: RPITIT trait for one endpoint of a provider
//! - `BoxProviderAdapter`: object-safe wrapper for dynamic dispatch
//! - `FallbackExecutor`: ordered, per-adapter-timeout mirror chain
//! - `ProviderRegistry`: provider id to adapter chain lookup

pub mod adapter;
pub mod box_adapter;
pub mod fallback;
pub mod registry;
