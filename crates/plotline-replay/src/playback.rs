//! Replay playback state management.
//!
//! The playback manager steps through historical bars at a controllable
//! speed. It is deliberately synchronous: the host drives it by calling
//! [`PlaybackManager::tick`] on a timer of [`PlaybackManager::interval`],
//! so the core carries no timers or tasks of its own.

use std::time::Duration;

use plotline_core::Candle;

use crate::protocol::MAX_SPEED;

/// Lower bound for the replay speed multiplier.
pub const MIN_SPEED: f64 = 0.1;

/// Current playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Manages replay playback over a bar history.
#[derive(Debug, Clone)]
pub struct PlaybackManager {
    state: PlaybackState,
    speed: f64,
    max_speed: f64,
    /// Index of the next bar to emit.
    next_index: usize,
}

impl PlaybackManager {
    /// Creates a new manager in the stopped state with the protocol
    /// speed ceiling.
    pub fn new() -> Self {
        Self::with_max_speed(MAX_SPEED)
    }

    /// Creates a manager with a configured speed ceiling (never above
    /// the protocol's [`MAX_SPEED`]).
    pub fn with_max_speed(max_speed: f64) -> Self {
        let max_speed = if max_speed.is_finite() {
            max_speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            MAX_SPEED
        };
        Self {
            state: PlaybackState::Stopped,
            speed: 1.0_f64.min(max_speed),
            max_speed,
            next_index: 0,
        }
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The effective speed ceiling.
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Index of the next bar to emit.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Whether playback is currently emitting bars.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Starts playback from the given bar index.
    pub fn start(&mut self, start_index: usize, speed: f64) {
        self.next_index = start_index;
        self.set_speed(speed);
        self.state = PlaybackState::Playing;
        log::info!(
            "starting replay at index {} (speed {}x)",
            start_index,
            self.speed
        );
    }

    /// Starts playback from the first bar at or after the given timestamp.
    pub fn start_at(&mut self, timestamp: f64, bars: &[Candle], speed: f64) {
        self.seek_to(timestamp, bars);
        self.start(self.next_index, speed);
    }

    /// Moves the playhead to the first bar at or after the given timestamp
    /// without changing the playback state.
    pub fn seek_to(&mut self, timestamp: f64, bars: &[Candle]) {
        self.next_index = bars.partition_point(|bar| bar.timestamp < timestamp);
    }

    /// Pauses playback. No-op unless playing.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Resumes a paused playback.
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    /// Stops playback and rewinds.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.next_index = 0;
    }

    /// Sets the speed multiplier, clamped into the allowed range.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() {
            self.speed = speed.clamp(MIN_SPEED, self.max_speed);
        }
    }

    /// The host timer interval implied by the current speed.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.speed)
    }

    /// Emits the next bar when playing.
    ///
    /// Returns `None` while stopped or paused, and transitions to stopped
    /// when the history is exhausted.
    pub fn tick<'a>(&mut self, bars: &'a [Candle]) -> Option<&'a Candle> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        match bars.get(self.next_index) {
            Some(bar) => {
                self.next_index += 1;
                Some(bar)
            }
            None => {
                log::info!("replay complete after {} bars", self.next_index);
                self.state = PlaybackState::Stopped;
                None
            }
        }
    }
}

impl Default for PlaybackManager {
    fn default() -> Self {
        Self::new()
    }
}
