//! Playback controller: the single authority over what is playing and
//! from where.
//!
//! Architecture:
//! - Owns the queue and the audio output; UI layers call only the
//!   narrow mutation API here.
//! - Every load carries a generation; audio events from a superseded
//!   load are discarded before they can touch state.
//! - A controller thread drains the output's event channel and feeds
//!   [`PlayerController::handle_event`].

use crossbeam_channel::Receiver;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use crate::audio::{AudioEvent, AudioEventKind, AudioOutput};
use crate::models::Track;
use crate::queue::{PlayQueue, RepeatMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStage {
    /// No track selected.
    Idle,
    /// Track selected, resource not ready yet.
    Loading,
    ReadyPaused,
    ReadyPlaying,
    /// Playback over for the current track (end of media, queue
    /// exhaustion, or an unusable resource); the track stays selected.
    Ended,
}

struct PlayerState {
    current_track: Option<Track>,
    stage: PlaybackStage,
    /// Play intent applied once the resource signals ready.
    pending_play: bool,
    position_secs: f64,
    duration_secs: f64,
    volume: u8,
}

/// Caller-visible playback state.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackSnapshot {
    pub current_track: Option<Track>,
    pub is_playing: bool,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub volume: u8,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub stage: PlaybackStage,
}

enum ToggleAction {
    None,
    Play,
    Pause,
    Replay(Track),
}

pub struct PlayerController {
    state: RwLock<PlayerState>,
    queue: RwLock<PlayQueue>,
    output: Arc<dyn AudioOutput>,
    generation: AtomicU64,
}

impl PlayerController {
    /// Build the controller and spawn the event-loop thread draining
    /// `events`.
    pub fn new(output: Arc<dyn AudioOutput>, events: Receiver<AudioEvent>) -> Arc<Self> {
        let controller = Self::with_output(output);

        let loop_controller = controller.clone();
        thread::spawn(move || {
            for event in events.iter() {
                loop_controller.handle_event(event);
            }
            log::info!("[Player] Audio event channel closed");
        });

        controller
    }

    /// Controller without an event loop; callers feed
    /// [`handle_event`](Self::handle_event) themselves.
    pub fn with_output(output: Arc<dyn AudioOutput>) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(PlayerState {
                current_track: None,
                stage: PlaybackStage::Idle,
                pending_play: false,
                position_secs: 0.0,
                duration_secs: 0.0,
                volume: 75,
            }),
            queue: RwLock::new(PlayQueue::new()),
            output,
            generation: AtomicU64::new(0),
        })
    }

    /// Replace the queue, select `track` and start loading it.
    pub fn play_track(&self, track: Track, queue_tracks: Vec<Track>) {
        let index = queue_tracks.iter().position(|t| t.id == track.id);
        {
            let mut queue = self.queue.write();
            queue.set_tracks(queue_tracks, index);
        }
        self.load(track, true);
    }

    /// Flip playing; no-op without a current track.
    pub fn toggle_play(&self) {
        let action = {
            let mut st = self.state.write();
            match st.stage {
                PlaybackStage::Idle => ToggleAction::None,
                PlaybackStage::Loading => {
                    st.pending_play = !st.pending_play;
                    ToggleAction::None
                }
                PlaybackStage::ReadyPaused => {
                    st.stage = PlaybackStage::ReadyPlaying;
                    ToggleAction::Play
                }
                PlaybackStage::ReadyPlaying => {
                    st.stage = PlaybackStage::ReadyPaused;
                    ToggleAction::Pause
                }
                PlaybackStage::Ended => match st.current_track.clone() {
                    Some(track) => ToggleAction::Replay(track),
                    None => ToggleAction::None,
                },
            }
        };

        match action {
            ToggleAction::Play => self.output.play(),
            ToggleAction::Pause => self.output.pause(),
            ToggleAction::Replay(track) => self.load(track, true),
            ToggleAction::None => {}
        }
    }

    pub fn play_next(&self) {
        let next = self.queue.write().advance();
        self.select(next);
    }

    pub fn play_previous(&self) {
        let prev = self.queue.write().retreat();
        self.select(prev);
    }

    /// Clamped to `[0, duration]`; ignored until the resource is ready.
    pub fn seek(&self, position_secs: f64) {
        let clamped = {
            let mut st = self.state.write();
            if !matches!(
                st.stage,
                PlaybackStage::ReadyPaused | PlaybackStage::ReadyPlaying
            ) {
                return;
            }
            let clamped = position_secs.clamp(0.0, st.duration_secs.max(0.0));
            st.position_secs = clamped;
            clamped
        };
        self.output.seek(clamped);
    }

    /// Volume in `0..=100`.
    pub fn set_volume(&self, volume: u8) {
        let volume = volume.min(100);
        self.state.write().volume = volume;
        self.output.set_volume(volume as f32 / 100.0);
    }

    pub fn set_shuffle(&self, shuffle: bool) {
        self.queue.write().set_shuffle(shuffle);
    }

    pub fn toggle_shuffle(&self) {
        self.queue.write().toggle_shuffle();
    }

    pub fn set_repeat(&self, mode: RepeatMode) {
        self.queue.write().repeat = mode;
    }

    pub fn current_track(&self) -> Option<Track> {
        self.state.read().current_track.clone()
    }

    pub fn is_playing(&self) -> bool {
        let st = self.state.read();
        Self::playing(&st)
    }

    pub fn queue_tracks(&self) -> Vec<Track> {
        self.queue.read().tracks().to_vec()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let st = self.state.read();
        let queue = self.queue.read();
        PlaybackSnapshot {
            current_track: st.current_track.clone(),
            is_playing: Self::playing(&st),
            position_secs: st.position_secs,
            duration_secs: st.duration_secs,
            volume: st.volume,
            shuffle: queue.shuffle,
            repeat: queue.repeat,
            stage: st.stage,
        }
    }

    /// Apply one audio event. Events from a superseded load are
    /// discarded here, never acted upon.
    pub fn handle_event(&self, event: AudioEvent) {
        let current = self.generation.load(Ordering::SeqCst);
        if event.generation != current {
            log::debug!(
                "[Player] Discarding stale audio event (gen {}, current {})",
                event.generation,
                current
            );
            return;
        }

        match event.kind {
            AudioEventKind::Ready { duration_secs } => {
                let start = {
                    let mut st = self.state.write();
                    if st.stage != PlaybackStage::Loading {
                        return;
                    }
                    let fallback = st
                        .current_track
                        .as_ref()
                        .map(|t| t.preview_duration as f64)
                        .unwrap_or(0.0);
                    st.duration_secs = duration_secs
                        .filter(|d| d.is_finite() && *d > 0.0)
                        .unwrap_or(fallback);
                    st.position_secs = 0.0;
                    if st.pending_play {
                        st.stage = PlaybackStage::ReadyPlaying;
                        true
                    } else {
                        st.stage = PlaybackStage::ReadyPaused;
                        false
                    }
                };
                if start {
                    self.output.play();
                }
            }
            AudioEventKind::Position { position_secs } => {
                let mut st = self.state.write();
                if st.stage == PlaybackStage::ReadyPlaying {
                    st.position_secs = position_secs;
                }
            }
            AudioEventKind::Ended => {
                {
                    let mut st = self.state.write();
                    if st.stage != PlaybackStage::ReadyPlaying {
                        return;
                    }
                    st.stage = PlaybackStage::Ended;
                    st.position_secs = 0.0;
                }
                self.play_next();
            }
            AudioEventKind::Error(e) => {
                log::error!("[Player] Audio error: {}", e);
                let mut st = self.state.write();
                st.stage = if st.current_track.is_some() {
                    PlaybackStage::Ended
                } else {
                    PlaybackStage::Idle
                };
                st.pending_play = false;
            }
        }
    }

    fn playing(st: &PlayerState) -> bool {
        st.stage == PlaybackStage::ReadyPlaying
            || (st.stage == PlaybackStage::Loading && st.pending_play)
    }

    fn select(&self, next: Option<Track>) {
        match next {
            Some(track) => self.load(track, true),
            None => {
                log::info!("[Player] Queue ended");
                self.output.stop();
                let mut st = self.state.write();
                st.stage = if st.current_track.is_some() {
                    PlaybackStage::Ended
                } else {
                    PlaybackStage::Idle
                };
                st.pending_play = false;
            }
        }
    }

    fn load(&self, track: Track, play_intent: bool) {
        let Some(url) = track.playback_url().map(str::to_string) else {
            log::warn!("[Player] Track unplayable (no audio URL): {}", track.title);
            let mut st = self.state.write();
            st.current_track = Some(track);
            st.stage = PlaybackStage::Ended;
            st.pending_play = false;
            st.position_secs = 0.0;
            st.duration_secs = 0.0;
            return;
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut st = self.state.write();
            log::info!(
                "[Player] Loading '{}' by '{}' (gen {})",
                track.title,
                track.artist,
                generation
            );
            st.current_track = Some(track);
            st.stage = PlaybackStage::Loading;
            st.pending_play = play_intent;
            st.position_secs = 0.0;
            st.duration_secs = 0.0;
        }
        self.output.load(generation, &url);
    }
}
