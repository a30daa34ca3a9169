//! Lyrics lookup by artist and title.
//!
//! Failures never reach the caller as errors: a miss maps to
//! [`LYRICS_NOT_FOUND`] and anything else to [`LYRICS_FETCH_FAILED`].

pub mod ovh;

pub use ovh::{LyricsClient, LYRICS_FETCH_FAILED, LYRICS_NOT_FOUND};
