use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::Track;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    Off,
    All,
    One,
}

/// Ordered track list governing next/previous navigation.
///
/// Mutated only by the playback controller. With shuffle on, the next
/// index is drawn uniformly from the indices not yet played in the
/// current pass, never the current index while other candidates remain.
pub struct PlayQueue {
    tracks: Vec<Track>,
    current_index: Option<usize>,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    played: HashSet<usize>,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            current_index: None,
            shuffle: false,
            repeat: RepeatMode::Off,
            played: HashSet::new(),
        }
    }

    /// Replace the queue contents, positioning on `start_index` when it
    /// is in range, else on the first track of a non-empty queue.
    pub fn set_tracks(&mut self, tracks: Vec<Track>, start_index: Option<usize>) {
        self.tracks = tracks;
        self.current_index = match start_index {
            Some(i) if i < self.tracks.len() => Some(i),
            _ if self.tracks.is_empty() => None,
            _ => Some(0),
        };
        self.played.clear();
        if let Some(i) = self.current_index {
            self.played.insert(i);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_track(&self) -> Option<Track> {
        self.current_index.and_then(|i| self.tracks.get(i).cloned())
    }

    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle);
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
        self.played.clear();
        if let Some(i) = self.current_index {
            self.played.insert(i);
        }
    }

    /// Advance per repeat/shuffle policy and return the newly selected
    /// track. Repeat-one reselects the current track without moving the
    /// index; `None` means the queue ran out (repeat off).
    pub fn advance(&mut self) -> Option<Track> {
        if self.tracks.is_empty() {
            return None;
        }

        if self.repeat == RepeatMode::One {
            return self.current_track();
        }

        let next = if self.shuffle {
            self.next_shuffled()
        } else {
            self.next_linear()
        }?;

        self.current_index = Some(next);
        self.played.insert(next);
        self.tracks.get(next).cloned()
    }

    /// Retreat one position. At index 0 repeat-all wraps to the last
    /// index; otherwise the queue stays on the first track.
    pub fn retreat(&mut self) -> Option<Track> {
        if self.tracks.is_empty() {
            return None;
        }

        if self.repeat == RepeatMode::One {
            return self.current_track();
        }

        let prev = match self.current_index {
            Some(0) | None => {
                if self.repeat == RepeatMode::All {
                    self.tracks.len() - 1
                } else {
                    0
                }
            }
            Some(i) => i - 1,
        };

        self.current_index = Some(prev);
        self.played.insert(prev);
        self.tracks.get(prev).cloned()
    }

    fn next_linear(&mut self) -> Option<usize> {
        let next = match self.current_index {
            Some(i) => i + 1,
            None => 0,
        };

        if next >= self.tracks.len() {
            if self.repeat == RepeatMode::All {
                self.played.clear();
                return Some(0);
            }
            return None;
        }

        Some(next)
    }

    fn next_shuffled(&mut self) -> Option<usize> {
        let candidates: Vec<usize> = (0..self.tracks.len())
            .filter(|i| !self.played.contains(i) && Some(*i) != self.current_index)
            .collect();

        if candidates.is_empty() {
            if self.repeat != RepeatMode::All {
                return None;
            }
            // Pass exhausted: start a fresh one, still avoiding an
            // immediate repeat of the current track.
            self.played.clear();
            let fresh: Vec<usize> = (0..self.tracks.len())
                .filter(|i| Some(*i) != self.current_index)
                .collect();
            if fresh.is_empty() {
                return self.current_index;
            }
            return fresh.choose(&mut rand::rng()).copied();
        }

        candidates.choose(&mut rand::rng()).copied()
    }
}

impl Default for PlayQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration: 100,
            preview_duration: 30,
            image: String::new(),
            preview_url: Some("https://a/p.mp3".to_string()),
            full_track_url: None,
            stream_url: None,
            download_url: None,
            source: Source::Jiosaavn,
            license: None,
            genre: None,
        }
    }

    fn queue_of(n: usize, start: usize) -> PlayQueue {
        let mut queue = PlayQueue::new();
        let tracks = (0..n).map(|i| track(&i.to_string())).collect();
        queue.set_tracks(tracks, Some(start));
        queue
    }

    #[test]
    fn test_repeat_one_never_moves_the_index() {
        let mut queue = queue_of(3, 1);
        queue.repeat = RepeatMode::One;

        for _ in 0..5 {
            let selected = queue.advance().unwrap();
            assert_eq!(selected.id, "1");
            assert_eq!(queue.current_index(), Some(1));
        }
    }

    #[test]
    fn test_repeat_off_stops_at_queue_end() {
        let mut queue = queue_of(3, 2);
        assert!(queue.advance().is_none());
        assert_eq!(queue.current_index(), Some(2));
        assert_eq!(queue.current_track().unwrap().id, "2");
    }

    #[test]
    fn test_repeat_all_wraps_to_first_index() {
        let mut queue = queue_of(3, 2);
        queue.repeat = RepeatMode::All;
        let selected = queue.advance().unwrap();
        assert_eq!(selected.id, "0");
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn test_linear_advance() {
        let mut queue = queue_of(3, 0);
        assert_eq!(queue.advance().unwrap().id, "1");
        assert_eq!(queue.advance().unwrap().id, "2");
    }

    #[test]
    fn test_retreat_wraps_only_on_repeat_all() {
        let mut queue = queue_of(3, 0);
        assert_eq!(queue.retreat().unwrap().id, "0");

        queue.repeat = RepeatMode::All;
        assert_eq!(queue.retreat().unwrap().id, "2");
    }

    #[test]
    fn test_shuffle_picks_unplayed_never_current() {
        let mut queue = queue_of(5, 2);
        queue.set_shuffle(true);

        let mut seen = HashSet::new();
        seen.insert(2usize);
        // Four advances must visit the four remaining indices exactly once.
        for _ in 0..4 {
            queue.advance().unwrap();
            let idx = queue.current_index().unwrap();
            assert!(seen.insert(idx), "index {} repeated within a pass", idx);
        }
        // Pass exhausted with repeat off: playback ends.
        assert!(queue.advance().is_none());
    }

    #[test]
    fn test_shuffle_with_repeat_all_starts_a_new_pass() {
        let mut queue = queue_of(3, 0);
        queue.set_shuffle(true);
        queue.repeat = RepeatMode::All;

        for _ in 0..10 {
            let before = queue.current_index().unwrap();
            queue.advance().unwrap();
            assert_ne!(queue.current_index().unwrap(), before);
        }
    }

    #[test]
    fn test_empty_queue_yields_nothing() {
        let mut queue = PlayQueue::new();
        assert!(queue.current_track().is_none());
        assert!(queue.advance().is_none());
        assert!(queue.retreat().is_none());
    }
}
