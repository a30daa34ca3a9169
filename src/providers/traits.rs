use crate::models::{Source, Track};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MusicProvider: Send + Sync {
    /// Which catalog this provider fronts.
    fn source(&self) -> Source;

    /// User-friendly name
    fn name(&self) -> &str;

    /// Free-text search, normalized to canonical tracks. Errors are the
    /// provider's own; the registry downgrades them at the boundary.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>>;
}
