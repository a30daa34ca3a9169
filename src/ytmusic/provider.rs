use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::models::YtTrack;
use crate::config::{REQUEST_TIMEOUT_SECONDS, YTMUSIC_API_URL};
use crate::models::{Source, Track};
use crate::providers::traits::MusicProvider;

pub struct YtMusicProvider {
    client: Client,
    base_url: String,
}

impl YtMusicProvider {
    pub fn new() -> Self {
        Self::with_base_url(YTMUSIC_API_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }
}

impl Default for YtMusicProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MusicProvider for YtMusicProvider {
    fn source(&self) -> Source {
        Source::YoutubeMusic
    }

    fn name(&self) -> &str {
        "YouTube Music"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>> {
        let url = format!("{}/ytmusic/search", self.base_url.trim_end_matches('/'));
        let resp: Vec<YtTrack> = self
            .client
            .get(&url)
            .query(&[("query", query), ("limit", &limit.to_string())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.into_iter().map(|t| t.into_track()).collect())
    }
}
