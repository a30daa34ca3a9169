//! JioSaavn response shapes, validated at the boundary and mapped to the
//! canonical track model. Every field besides the envelope is optional;
//! missing metadata default-fills rather than failing the record.

use serde::{Deserialize, Deserializer};

use crate::models::{Source, Track};

#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    pub data: SearchData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub results: Vec<SaavnTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaavnTrack {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub album: Option<SaavnAlbum>,
    /// The API serves this as a string; some mirrors use a number.
    #[serde(default, deserialize_with = "duration_seconds")]
    pub duration: u64,
    #[serde(default)]
    pub artists: Option<SaavnArtists>,
    #[serde(default)]
    pub image: Vec<SaavnVariant>,
    #[serde(default, rename = "downloadUrl")]
    pub download_url: Vec<SaavnVariant>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaavnAlbum {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaavnArtists {
    #[serde(default)]
    pub primary: Vec<SaavnArtistRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaavnArtistRef {
    #[serde(default)]
    pub name: String,
}

/// Quality-tagged URL entry, shared by the image and download lists.
#[derive(Debug, Clone, Deserialize)]
pub struct SaavnVariant {
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

fn duration_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
        Other(serde_json::Value),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n,
        Raw::Str(s) => s.trim().parse().unwrap_or(0),
        Raw::Other(_) => 0,
    })
}

impl SaavnTrack {
    /// Highest declared download quality (320kbps), else the last entry.
    fn best_download_url(&self) -> Option<String> {
        let preferred = self
            .download_url
            .iter()
            .find(|v| v.quality.as_deref() == Some("320kbps"))
            .or_else(|| self.download_url.last());
        preferred.and_then(|v| v.url.clone()).filter(|u| !u.is_empty())
    }

    /// Highest declared image quality (500x500), else the first entry.
    fn best_image_url(&self) -> String {
        let preferred = self
            .image
            .iter()
            .find(|v| v.quality.as_deref() == Some("500x500"))
            .or_else(|| self.image.first());
        preferred
            .and_then(|v| v.url.clone())
            .unwrap_or_default()
    }

    pub fn into_track(self) -> Track {
        let audio_url = self.best_download_url();
        let image = self.best_image_url();
        let artist = self
            .artists
            .as_ref()
            .and_then(|a| a.primary.first())
            .map(|a| a.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown Artist".to_string());

        Track {
            id: format!("jiosaavn_{}", self.id),
            title: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown Title".to_string()),
            artist,
            album: self
                .album
                .and_then(|a| a.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown Album".to_string()),
            duration: self.duration,
            preview_duration: 30,
            image,
            preview_url: audio_url.clone(),
            full_track_url: audio_url.clone(),
            stream_url: audio_url.clone(),
            download_url: audio_url,
            source: Source::Jiosaavn,
            license: Some("JioSaavn".to_string()),
            genre: self.language,
        }
    }
}
