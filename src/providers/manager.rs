use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::{Source, Track};
use crate::providers::traits::MusicProvider;

/// Registry of catalog providers keyed by source, with one active
/// selection. Provider failures never escape: any error becomes an
/// empty result set at this boundary.
pub struct ProviderRegistry {
    providers: RwLock<HashMap<Source, Arc<dyn MusicProvider>>>,
    active: RwLock<Source>,
}

impl ProviderRegistry {
    pub fn new(default_source: Source) -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
            active: RwLock::new(default_source),
        }
    }

    pub async fn register(&self, provider: Arc<dyn MusicProvider>) {
        let mut providers = self.providers.write().await;
        log::info!(
            "[Registry] Registering music provider: {} ({})",
            provider.name(),
            provider.source().as_str()
        );
        providers.insert(provider.source(), provider);
    }

    pub async fn set_active(&self, source: Source) -> Result<(), AppError> {
        let providers = self.providers.read().await;
        if !providers.contains_key(&source) {
            return Err(AppError::InvalidProvider(source.as_str().to_string()));
        }
        *self.active.write().await = source;
        Ok(())
    }

    pub async fn active_source(&self) -> Source {
        *self.active.read().await
    }

    pub async fn list_sources(&self) -> Vec<Source> {
        self.providers.read().await.keys().copied().collect()
    }

    /// Search the active provider.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<Track> {
        let source = self.active_source().await;
        self.search_with(source, query, limit).await
    }

    /// Search a specific provider, downgrading any failure to "no results".
    pub async fn search_with(&self, source: Source, query: &str, limit: usize) -> Vec<Track> {
        let provider = {
            let providers = self.providers.read().await;
            providers.get(&source).cloned()
        };

        let Some(provider) = provider else {
            log::warn!("[Registry] No provider registered for {}", source.as_str());
            return Vec::new();
        };

        match provider.search(query, limit).await {
            Ok(tracks) => {
                log::debug!(
                    "[Registry] {} returned {} tracks for '{}'",
                    source.as_str(),
                    tracks.len(),
                    query
                );
                tracks
            }
            Err(e) => {
                log::warn!("[Registry] {} search failed: {}", source.as_str(), e);
                Vec::new()
            }
        }
    }
}
