//! Provider registry for runtime chain lookup.
//!
//! Maps a provider id to its ordered adapter chain. Registration order is
//! kept so listings match the configuration file.

use std::collections::HashMap;

use super::box_adapter::BoxProviderAdapter;

/// A registered provider: display name plus its mirror chain.
#[derive(Debug)]
pub struct RegisteredProvider {
    pub id: String,
    pub name: String,
    pub adapters: Vec<BoxProviderAdapter>,
}

/// Registry of remote providers, indexed by id.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: Vec<RegisteredProvider>,
    index: HashMap<String, usize>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider chain under `id`.
    ///
    /// If a provider with this id already exists, it is replaced in place.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        adapters: Vec<BoxProviderAdapter>,
    ) {
        let id = id.into();
        let entry = RegisteredProvider {
            id: id.clone(),
            name: name.into(),
            adapters,
        };
        match self.index.get(&id) {
            Some(&pos) => self.providers[pos] = entry,
            None => {
                self.index.insert(id, self.providers.len());
                self.providers.push(entry);
            }
        }
    }

    /// Look up a provider by id.
    pub fn get(&self, id: &str) -> Option<&RegisteredProvider> {
        self.index.get(id).map(|&pos| &self.providers[pos])
    }

    /// Adapter chain for `id`, in fallback order.
    pub fn chain(&self, id: &str) -> Option<&[BoxProviderAdapter]> {
        self.get(id).map(|p| p.adapters.as_slice())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All registered providers in registration order.
    pub fn list(&self) -> &[RegisteredProvider] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
