use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::config::{LYRICS_API_URL, REQUEST_TIMEOUT_SECONDS};

pub const LYRICS_NOT_FOUND: &str = "Lyrics not found.";
pub const LYRICS_FETCH_FAILED: &str = "Could not fetch lyrics. Please try again later.";

#[derive(Debug, Deserialize)]
struct LyricsResponse {
    #[serde(default)]
    lyrics: Option<String>,
}

pub struct LyricsClient {
    client: Client,
    base_url: String,
}

impl LyricsClient {
    pub fn new() -> Self {
        Self::with_base_url(LYRICS_API_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }

    /// Always returns displayable text: the lyrics, or a sentinel.
    pub async fn get_lyrics(&self, artist: &str, title: &str) -> String {
        match self.fetch(artist, title).await {
            Ok(Some(lyrics)) => lyrics,
            Ok(None) => LYRICS_NOT_FOUND.to_string(),
            Err(e) => {
                log::warn!("[Lyrics] Fetch failed for {} - {}: {}", artist, title, e);
                LYRICS_FETCH_FAILED.to_string()
            }
        }
    }

    async fn fetch(&self, artist: &str, title: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/v1/{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(artist),
            urlencoding::encode(title)
        );

        let resp = self.client.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: LyricsResponse = resp.error_for_status()?.json().await?;
        Ok(body.lyrics.filter(|l| !l.trim().is_empty()))
    }
}

impl Default for LyricsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_maps_to_fetch_failed_sentinel() {
        let client = LyricsClient::with_base_url("http://127.0.0.1:9".to_string());
        let text = client.get_lyrics("Nova", "Skyline").await;
        assert_eq!(text, LYRICS_FETCH_FAILED);
    }

    #[test]
    fn test_empty_lyrics_body_counts_as_not_found() {
        let body: LyricsResponse = serde_json::from_str(r#"{ "lyrics": "  " }"#).unwrap();
        assert!(body.lyrics.filter(|l| !l.trim().is_empty()).is_none());

        let missing: LyricsResponse = serde_json::from_str("{}").unwrap();
        assert!(missing.lyrics.is_none());
    }
}
