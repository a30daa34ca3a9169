//! Multi-source music player core.
//!
//! Searches third-party catalogs (JioSaavn, YouTube Music), normalizes
//! their responses into one track model, keeps a liked-songs/playlists
//! library persisted locally, and drives a single audio resource
//! through a queue-aware playback controller. The `server` module is a
//! mock search backend for development; UI layers sit on top of the
//! `App` composition root.

pub mod audio;
pub mod config;
pub mod errors;
pub mod jiosaavn;
pub mod library;
pub mod lyrics;
pub mod models;
pub mod player;
pub mod providers;
pub mod queue;
pub mod search;
pub mod server;
pub mod storage;
pub mod ytmusic;

use std::sync::Arc;

use audio::{AudioOutput, RodioOutput};
use crossbeam_channel::Receiver;
use jiosaavn::JioSaavnProvider;
use library::LibraryManager;
use lyrics::LyricsClient;
use models::Source;
use player::PlayerController;
use providers::ProviderRegistry;
use search::SearchSession;
use storage::StorageManager;
use ytmusic::YtMusicProvider;

/// Owned application state handed to UI layers: catalog, library and
/// player behind their narrow mutation APIs, no ambient globals.
pub struct App {
    pub catalog: Arc<ProviderRegistry>,
    pub search: Arc<SearchSession>,
    pub library: Arc<LibraryManager>,
    pub player: Arc<PlayerController>,
    pub lyrics: Arc<LyricsClient>,
}

impl App {
    /// Wire everything against the real audio device and default
    /// storage location.
    pub async fn new() -> Self {
        let (output, events) = RodioOutput::spawn();
        Self::with_audio_output(output, events, StorageManager::open_default()).await
    }

    pub async fn with_audio_output(
        output: Arc<dyn AudioOutput>,
        events: Receiver<audio::AudioEvent>,
        storage: StorageManager,
    ) -> Self {
        let catalog = Arc::new(ProviderRegistry::new(Source::Jiosaavn));
        catalog.register(Arc::new(JioSaavnProvider::new())).await;
        catalog.register(Arc::new(YtMusicProvider::new())).await;

        Self {
            search: Arc::new(SearchSession::new(catalog.clone())),
            library: Arc::new(LibraryManager::new(storage)),
            player: PlayerController::new(output, events),
            lyrics: Arc::new(LyricsClient::new()),
            catalog,
        }
    }
}
