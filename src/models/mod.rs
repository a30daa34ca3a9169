use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Jiosaavn,
    YoutubeMusic,
}

impl Source {
    pub fn as_str(&self) -> &str {
        match self {
            Source::Jiosaavn => "jiosaavn",
            Source::YoutubeMusic => "youtube_music",
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jiosaavn" => Ok(Source::Jiosaavn),
            "youtube_music" | "ytmusic" => Ok(Source::YoutubeMusic),
            _ => Err(format!("Invalid source: {}", s)),
        }
    }
}

/// Canonical track record every provider response normalizes into.
///
/// Serialized field names follow the original wire shape so persisted
/// state and mock-server payloads stay interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration: u64,
    #[serde(rename = "previewDuration")]
    pub preview_duration: u64,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(
        default,
        rename = "fullTrackUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_track_url: Option<String>,
    #[serde(default, rename = "streamUrl", skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(
        default,
        rename = "downloadUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url: Option<String>,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl Track {
    /// URL the audio resource should load: the full track when present,
    /// otherwise the preview clip. `None` means the track is unplayable.
    pub fn playback_url(&self) -> Option<&str> {
        self.full_track_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.preview_url.as_deref().filter(|u| !u.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_with_urls(full: Option<&str>, preview: Option<&str>) -> Track {
        Track {
            id: "t1".to_string(),
            title: "Title".to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration: 180,
            preview_duration: 30,
            image: String::new(),
            preview_url: preview.map(str::to_string),
            full_track_url: full.map(str::to_string),
            stream_url: None,
            download_url: None,
            source: Source::Jiosaavn,
            license: None,
            genre: None,
        }
    }

    #[test]
    fn test_playback_url_prefers_full_track() {
        let track = track_with_urls(Some("https://a/full.mp3"), Some("https://a/preview.mp3"));
        assert_eq!(track.playback_url(), Some("https://a/full.mp3"));
    }

    #[test]
    fn test_playback_url_falls_back_to_preview() {
        let track = track_with_urls(None, Some("https://a/preview.mp3"));
        assert_eq!(track.playback_url(), Some("https://a/preview.mp3"));

        let empty_full = track_with_urls(Some(""), Some("https://a/preview.mp3"));
        assert_eq!(empty_full.playback_url(), Some("https://a/preview.mp3"));
    }

    #[test]
    fn test_playback_url_absent_means_unplayable() {
        assert_eq!(track_with_urls(None, None).playback_url(), None);
    }

    #[test]
    fn test_source_round_trip() {
        assert_eq!("jiosaavn".parse::<Source>().unwrap(), Source::Jiosaavn);
        assert_eq!(
            "youtube_music".parse::<Source>().unwrap(),
            Source::YoutubeMusic
        );
        assert!("spotify".parse::<Source>().is_err());
        assert_eq!(Source::YoutubeMusic.as_str(), "youtube_music");
    }

    #[test]
    fn test_track_serializes_with_wire_field_names() {
        let track = track_with_urls(Some("https://a/full.mp3"), None);
        let value = serde_json::to_value(&track).unwrap();
        assert_eq!(value["fullTrackUrl"], "https://a/full.mp3");
        assert_eq!(value["previewDuration"], 30);
        assert_eq!(value["source"], "jiosaavn");
        assert!(value.get("preview_url").is_none());
    }
}
