//! Liked songs and user playlists, independent of playback.
//!
//! Reads come from an in-memory mirror loaded once at startup; every
//! mutation writes through to storage before returning.

pub mod models;

use chrono::Utc;
use models::Playlist;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Track;
use crate::storage::StorageManager;

pub const LIKED_SONGS_KEY: &str = "likedSongs";
pub const PLAYLISTS_KEY: &str = "playlists";

pub struct LibraryManager {
    storage: StorageManager,
    liked: RwLock<Vec<Track>>,
    playlists: RwLock<Vec<Playlist>>,
}

impl LibraryManager {
    pub fn new(storage: StorageManager) -> Self {
        let liked: Vec<Track> = storage.get(LIKED_SONGS_KEY).unwrap_or_default();
        let playlists: Vec<Playlist> = storage.get(PLAYLISTS_KEY).unwrap_or_default();
        log::info!(
            "[Library] Loaded {} liked songs, {} playlists",
            liked.len(),
            playlists.len()
        );

        Self {
            storage,
            liked: RwLock::new(liked),
            playlists: RwLock::new(playlists),
        }
    }

    pub fn is_liked(&self, track_id: &str) -> bool {
        self.liked.read().iter().any(|t| t.id == track_id)
    }

    pub fn liked_songs(&self) -> Vec<Track> {
        self.liked.read().clone()
    }

    /// Idempotent: liking an already-liked track changes nothing.
    pub fn add_to_liked_songs(&self, track: Track) -> Result<(), AppError> {
        {
            let mut liked = self.liked.write();
            if liked.iter().any(|t| t.id == track.id) {
                return Ok(());
            }
            liked.push(track);
        }
        self.persist_liked()
    }

    pub fn remove_from_liked_songs(&self, track_id: &str) -> Result<(), AppError> {
        {
            let mut liked = self.liked.write();
            let before = liked.len();
            liked.retain(|t| t.id != track_id);
            if liked.len() == before {
                return Ok(());
            }
        }
        self.persist_liked()
    }

    /// Creates a playlist and returns it; an empty or whitespace-only
    /// name is a no-op returning `None`.
    pub fn create_playlist(&self, name: &str) -> Result<Option<Playlist>, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let playlist = Playlist {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            tracks: Vec::new(),
            created_at: Utc::now().timestamp(),
        };
        self.playlists.write().push(playlist.clone());
        self.persist_playlists()?;
        Ok(Some(playlist))
    }

    pub fn delete_playlist(&self, playlist_id: &str) -> Result<(), AppError> {
        {
            let mut playlists = self.playlists.write();
            let before = playlists.len();
            playlists.retain(|p| p.id != playlist_id);
            if playlists.len() == before {
                return Ok(());
            }
        }
        self.persist_playlists()
    }

    pub fn playlists(&self) -> Vec<Playlist> {
        self.playlists.read().clone()
    }

    pub fn get_playlist(&self, playlist_id: &str) -> Option<Playlist> {
        self.playlists
            .read()
            .iter()
            .find(|p| p.id == playlist_id)
            .cloned()
    }

    /// Appends without dedup; the same track may appear twice.
    pub fn add_to_playlist(&self, playlist_id: &str, track: Track) -> Result<(), AppError> {
        {
            let mut playlists = self.playlists.write();
            let Some(playlist) = playlists.iter_mut().find(|p| p.id == playlist_id) else {
                log::warn!("[Library] add_to_playlist: no playlist {}", playlist_id);
                return Ok(());
            };
            playlist.tracks.push(track);
        }
        self.persist_playlists()
    }

    /// Removes every entry with the given track id.
    pub fn remove_from_playlist(&self, playlist_id: &str, track_id: &str) -> Result<(), AppError> {
        {
            let mut playlists = self.playlists.write();
            let Some(playlist) = playlists.iter_mut().find(|p| p.id == playlist_id) else {
                return Ok(());
            };
            playlist.tracks.retain(|t| t.id != track_id);
        }
        self.persist_playlists()
    }

    fn persist_liked(&self) -> Result<(), AppError> {
        self.storage.set(LIKED_SONGS_KEY, &*self.liked.read())
    }

    fn persist_playlists(&self) -> Result<(), AppError> {
        self.storage.set(PLAYLISTS_KEY, &*self.playlists.read())
    }
}
