//! Playback session state machine and elapsed-time tracking.

use std::time::Instant;

use super::types::Track;

/// Transport states of the playback controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// No session exists.
    Idle,
    /// A track is selected and has never been started.
    Loaded,
    Playing,
    Paused,
}

/// The single client-side record of which track is active, whether it is
/// playing, and elapsed time.
///
/// Exactly one instance exists at a time; selecting a track replaces the
/// whole session rather than merging into it.
#[derive(Clone, Debug)]
pub struct PlaybackSession {
    pub track: Track,
    is_playing: bool,
    started: bool,
    elapsed_base_secs: u32,
    last_update: Instant,
}

impl PlaybackSession {
    /// A fresh, paused session at elapsed 0.
    pub fn new(track: Track) -> Self {
        Self {
            track,
            is_playing: false,
            started: false,
            elapsed_base_secs: 0,
            last_update: Instant::now(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn state(&self) -> PlayerState {
        if self.is_playing {
            PlayerState::Playing
        } else if self.started {
            PlayerState::Paused
        } else {
            PlayerState::Loaded
        }
    }

    /// Elapsed seconds, accrued from a monotonic clock while playing and
    /// clamped to the track duration.
    pub fn elapsed_secs(&self) -> u32 {
        let elapsed = if self.is_playing {
            self.elapsed_base_secs
                .saturating_add(self.last_update.elapsed().as_secs() as u32)
        } else {
            self.elapsed_base_secs
        };
        elapsed.min(self.track.duration)
    }

    /// Flips between playing and paused. Pausing folds the accrued time
    /// into the base so a later resume continues from the same position.
    pub fn toggle(&mut self) {
        if self.is_playing {
            self.elapsed_base_secs = self.elapsed_secs();
            self.is_playing = false;
        } else {
            self.last_update = Instant::now();
            self.is_playing = true;
            self.started = true;
        }
    }
}

/// Formats a second count as `M:SS` with zero-padded seconds. Minutes are
/// not limited to two digits, so 3600 renders as `60:00`.
pub fn format_elapsed(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
