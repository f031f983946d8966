//! Quick search provider registry.
//!
//! The registry is an explicitly shared service: create one per application
//! and hand an `Arc` to every component that contributes providers.
//! Providers are matched by identity (`Arc::ptr_eq`), never by value.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use quicksearch_core::ActionPath;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{ProviderId, SearchProvider, SearchResult};

/// Results of one provider, under its section header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSection {
    pub provider: ProviderId,
    pub name: String,
    pub results: Vec<SearchResult>,
}

/// Registry of searchable providers.
pub struct QuickSearchService {
    /// Registration order is result order.
    providers: RwLock<Vec<Arc<dyn SearchProvider>>>,
}

impl QuickSearchService {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(Vec::new()),
        }
    }

    /// Register a provider.
    ///
    /// Returns `false` if this exact instance is already registered.
    pub fn register_provider(&self, provider: Arc<dyn SearchProvider>) -> bool {
        let mut providers = self.providers.write();
        if providers.iter().any(|p| Arc::ptr_eq(p, &provider)) {
            tracing::debug!("Provider {} already registered", provider.id());
            return false;
        }
        tracing::info!("Registered search provider {}", provider.id());
        providers.push(provider);
        true
    }

    /// Unregister exactly this provider instance.
    ///
    /// Returns `true` if it was registered. Unknown providers are ignored.
    pub fn unregister_provider(&self, provider: &Arc<dyn SearchProvider>) -> bool {
        let mut providers = self.providers.write();
        match providers.iter().position(|p| Arc::ptr_eq(p, provider)) {
            Some(pos) => {
                providers.remove(pos);
                tracing::info!("Unregistered search provider {}", provider.id());
                true
            }
            None => {
                tracing::debug!("Provider {} was not registered", provider.id());
                false
            }
        }
    }

    pub fn is_registered(&self, provider: &Arc<dyn SearchProvider>) -> bool {
        self.providers.read().iter().any(|p| Arc::ptr_eq(p, provider))
    }

    /// Registered providers, in registration order.
    pub fn providers(&self) -> Vec<Arc<dyn SearchProvider>> {
        self.providers.read().clone()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.read().len()
    }

    /// Query every provider. Providers with no results are left out.
    pub fn search(&self, query: &str) -> Vec<SearchSection> {
        // Providers may call back into the registry, so search a snapshot.
        self.providers()
            .into_iter()
            .filter_map(|provider| {
                let results = provider.search(query);
                if results.is_empty() {
                    return None;
                }
                Some(SearchSection {
                    provider: provider.id(),
                    name: provider.section_name(),
                    results,
                })
            })
            .collect()
    }

    /// Activate a search result.
    pub fn invoke(&self, provider: ProviderId, path: &ActionPath) -> ProviderResult<()> {
        let target = self
            .providers()
            .into_iter()
            .find(|p| p.id() == provider)
            .ok_or(ProviderError::ProviderNotFound(provider))?;
        target.invoke(path)
    }

    /// Activate a [`SearchResult`] returned by [`Self::search`].
    pub fn activate(&self, result: &SearchResult) -> ProviderResult<()> {
        self.invoke(result.provider, &result.path)
    }
}

impl Default for QuickSearchService {
    fn default() -> Self {
        Self::new()
    }
}
