//! rodio-backed audio resource.
//!
//! A dedicated worker thread owns the output stream and sink; the
//! controller talks to it over a command channel and hears back over a
//! generation-tagged event channel. A load that has been superseded
//! (the shared generation moved on) is dropped before it can touch the
//! sink, so stale audio never starts.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::traits::{AudioEvent, AudioEventKind, AudioOutput};

const POLL_INTERVAL: Duration = Duration::from_millis(200);
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

enum OutputCommand {
    Load { generation: u64, url: String },
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
    Stop,
}

pub struct RodioOutput {
    commands: Sender<OutputCommand>,
    current_generation: Arc<AtomicU64>,
}

impl RodioOutput {
    /// Spawn the worker and return the handle plus its event stream.
    pub fn spawn() -> (Arc<Self>, Receiver<AudioEvent>) {
        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        let current_generation = Arc::new(AtomicU64::new(0));

        let worker_generation = current_generation.clone();
        thread::spawn(move || {
            output_worker(command_rx, event_tx, worker_generation);
        });

        (
            Arc::new(Self {
                commands: command_tx,
                current_generation,
            }),
            event_rx,
        )
    }
}

impl AudioOutput for RodioOutput {
    fn load(&self, generation: u64, url: &str) {
        self.current_generation.store(generation, Ordering::SeqCst);
        let _ = self.commands.send(OutputCommand::Load {
            generation,
            url: url.to_string(),
        });
    }

    fn play(&self) {
        let _ = self.commands.send(OutputCommand::Play);
    }

    fn pause(&self) {
        let _ = self.commands.send(OutputCommand::Pause);
    }

    fn seek(&self, position_secs: f64) {
        let _ = self.commands.send(OutputCommand::Seek(position_secs));
    }

    fn set_volume(&self, volume: f32) {
        let _ = self.commands.send(OutputCommand::SetVolume(volume));
    }

    fn stop(&self) {
        let _ = self.commands.send(OutputCommand::Stop);
    }
}

fn output_worker(
    commands: Receiver<OutputCommand>,
    events: Sender<AudioEvent>,
    current_generation: Arc<AtomicU64>,
) {
    log::info!("[AudioOutput] Worker started");

    let stream = match OutputStream::try_default() {
        Ok(pair) => Some(pair),
        Err(e) => {
            log::error!("[AudioOutput] No output device: {}", e);
            None
        }
    };

    let mut sink: Option<Sink> = None;
    let mut generation: u64 = 0;
    let mut playing = false;
    let mut volume: f32 = 0.75;

    loop {
        match commands.recv_timeout(POLL_INTERVAL) {
            Ok(OutputCommand::Load { generation: gen, url }) => {
                // Superseded while queued: a newer load already bumped
                // the shared counter.
                if current_generation.load(Ordering::SeqCst) != gen {
                    log::debug!("[AudioOutput] Dropping superseded load (gen {})", gen);
                    continue;
                }

                if let Some(s) = sink.take() {
                    s.stop();
                }
                playing = false;

                let Some((_, handle)) = &stream else {
                    let _ = events.send(AudioEvent {
                        generation: gen,
                        kind: AudioEventKind::Error("no audio output device".to_string()),
                    });
                    continue;
                };

                match fetch_and_decode(&url) {
                    Ok((source, duration_secs)) => {
                        if current_generation.load(Ordering::SeqCst) != gen {
                            log::debug!(
                                "[AudioOutput] Dropping superseded load after fetch (gen {})",
                                gen
                            );
                            continue;
                        }

                        let new_sink = match Sink::try_new(handle) {
                            Ok(s) => s,
                            Err(e) => {
                                let _ = events.send(AudioEvent {
                                    generation: gen,
                                    kind: AudioEventKind::Error(e.to_string()),
                                });
                                continue;
                            }
                        };
                        new_sink.pause();
                        new_sink.set_volume(volume);
                        new_sink.append(source);

                        sink = Some(new_sink);
                        generation = gen;
                        let _ = events.send(AudioEvent {
                            generation: gen,
                            kind: AudioEventKind::Ready { duration_secs },
                        });
                    }
                    Err(e) => {
                        log::warn!("[AudioOutput] Load failed for {}: {}", url, e);
                        let _ = events.send(AudioEvent {
                            generation: gen,
                            kind: AudioEventKind::Error(e.to_string()),
                        });
                    }
                }
            }
            Ok(OutputCommand::Play) => {
                if let Some(s) = &sink {
                    s.play();
                    playing = true;
                }
            }
            Ok(OutputCommand::Pause) => {
                if let Some(s) = &sink {
                    s.pause();
                }
                playing = false;
            }
            Ok(OutputCommand::Seek(position_secs)) => {
                if let Some(s) = &sink {
                    if let Err(e) = s.try_seek(Duration::from_secs_f64(position_secs.max(0.0))) {
                        log::warn!("[AudioOutput] Seek failed: {}", e);
                    }
                }
            }
            Ok(OutputCommand::SetVolume(v)) => {
                volume = v.clamp(0.0, 1.0);
                if let Some(s) = &sink {
                    s.set_volume(volume);
                }
            }
            Ok(OutputCommand::Stop) => {
                if let Some(s) = sink.take() {
                    s.stop();
                }
                playing = false;
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(s) = &sink {
                    if playing && s.empty() {
                        playing = false;
                        let _ = events.send(AudioEvent {
                            generation,
                            kind: AudioEventKind::Ended,
                        });
                    } else if playing {
                        let _ = events.send(AudioEvent {
                            generation,
                            kind: AudioEventKind::Position {
                                position_secs: s.get_pos().as_secs_f64(),
                            },
                        });
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    log::info!("[AudioOutput] Worker stopped");
}

/// Fetch the full resource and hand rodio a seekable in-memory source.
fn fetch_and_decode(url: &str) -> anyhow::Result<(Decoder<Cursor<Vec<u8>>>, Option<f64>)> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let bytes = client.get(url).send()?.error_for_status()?.bytes()?;

    let decoder = Decoder::new(Cursor::new(bytes.to_vec()))?;
    let duration_secs = decoder.total_duration().map(|d| d.as_secs_f64());
    Ok((decoder, duration_secs))
}
