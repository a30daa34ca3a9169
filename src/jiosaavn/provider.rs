use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::models::SearchEnvelope;
use crate::config::{JIOSAAVN_API_URL, REQUEST_TIMEOUT_SECONDS};
use crate::models::{Source, Track};
use crate::providers::traits::MusicProvider;

pub struct JioSaavnProvider {
    client: Client,
    base_url: String,
}

impl JioSaavnProvider {
    pub fn new() -> Self {
        Self::with_base_url(JIOSAAVN_API_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }
}

impl Default for JioSaavnProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MusicProvider for JioSaavnProvider {
    fn source(&self) -> Source {
        Source::Jiosaavn
    }

    fn name(&self) -> &str {
        "JioSaavn"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>> {
        let resp: SearchEnvelope = self
            .client
            .get(&self.base_url)
            .query(&[("query", query), ("limit", &limit.to_string())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp
            .data
            .results
            .into_iter()
            .map(|t| t.into_track())
            .collect())
    }
}
