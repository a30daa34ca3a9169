use serde::Deserialize;

use crate::models::{Source, Track};

/// Flat track record served by the YouTube Music bridge. The bridge
/// already resolves stream URLs, so mapping is field-for-field.
#[derive(Debug, Clone, Deserialize)]
pub struct YtTrack {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default, rename = "fullTrackUrl")]
    pub full_track_url: Option<String>,
    #[serde(default, rename = "streamUrl")]
    pub stream_url: Option<String>,
    #[serde(default, rename = "downloadUrl")]
    pub download_url: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl YtTrack {
    pub fn into_track(self) -> Track {
        Track {
            id: self.id,
            title: if self.title.is_empty() {
                "Unknown Title".to_string()
            } else {
                self.title
            },
            artist: if self.artist.is_empty() {
                "Unknown Artist".to_string()
            } else {
                self.artist
            },
            album: if self.album.is_empty() {
                "Unknown Album".to_string()
            } else {
                self.album
            },
            duration: self.duration,
            // The bridge serves 30 second preview clips.
            preview_duration: 30,
            image: self.image,
            preview_url: self.preview_url,
            full_track_url: self.full_track_url,
            stream_url: self.stream_url,
            download_url: self.download_url,
            source: Source::YoutubeMusic,
            license: self.license,
            genre: self.genre,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_record_maps_field_for_field() {
        let raw: YtTrack = serde_json::from_str(
            r#"{
                "id": "yt_1",
                "title": "Skyline",
                "artist": "Nova",
                "album": "Dawn",
                "duration": 212,
                "image": "https://img/t.jpg",
                "preview_url": "https://yt/p.mp3",
                "fullTrackUrl": "https://yt/f.mp3",
                "streamUrl": "https://yt/s.mp3",
                "downloadUrl": "https://yt/d.mp3",
                "license": "YouTube",
                "genre": "Pop"
            }"#,
        )
        .unwrap();
        let track = raw.into_track();

        assert_eq!(track.id, "yt_1");
        assert_eq!(track.source, Source::YoutubeMusic);
        assert_eq!(track.preview_duration, 30);
        assert_eq!(track.full_track_url.as_deref(), Some("https://yt/f.mp3"));
        assert_eq!(track.playback_url(), Some("https://yt/f.mp3"));
    }

    #[test]
    fn test_missing_metadata_default_fills() {
        let raw: YtTrack = serde_json::from_str(r#"{ "id": "yt_2" }"#).unwrap();
        let track = raw.into_track();
        assert_eq!(track.artist, "Unknown Artist");
        assert_eq!(track.title, "Unknown Title");
        assert_eq!(track.album, "Unknown Album");
    }
}
