use crossbeam_channel::Receiver;

/// Event emitted by the audio resource, tagged with the load generation
/// it belongs to. The controller discards events whose generation no
/// longer matches the current load.
#[derive(Debug, Clone)]
pub struct AudioEvent {
    pub generation: u64,
    pub kind: AudioEventKind,
}

#[derive(Debug, Clone)]
pub enum AudioEventKind {
    /// The resource finished loading and can start. Duration is absent
    /// when the container does not declare one.
    Ready { duration_secs: Option<f64> },
    /// Periodic playhead report while playing.
    Position { position_secs: f64 },
    /// End of media.
    Ended,
    /// Load or decode failure.
    Error(String),
}

pub type AudioEvents = Receiver<AudioEvent>;

/// The single audio-playback resource. Exclusively owned by the playback
/// controller; no other component starts or stops it directly.
pub trait AudioOutput: Send + Sync {
    /// Begin loading `url` under the given generation. Readiness is
    /// signaled by a [`AudioEventKind::Ready`] event, not polled.
    fn load(&self, generation: u64, url: &str);

    fn play(&self);

    fn pause(&self);

    fn seek(&self, position_secs: f64);

    /// Gain in `0.0..=1.0`.
    fn set_volume(&self, volume: f32);

    fn stop(&self);
}
