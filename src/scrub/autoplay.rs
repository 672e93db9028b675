// SPDX-License-Identifier: MPL-2.0
//! Autoplay: a repeating-timer state machine advancing a scrub cursor.
//!
//! The machine itself is pure; the application layer arms one
//! `iced::time::every(interval)` subscription while it is `Playing` and
//! feeds ticks back in. Subscription identity includes the interval, so an
//! interval change cancels the old timer and the next tick fires one full
//! new period after the change.

use super::cursor::{StepDirection, ValueCursor};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
}

/// Autoplay state: play/stop, tick interval and end-of-list policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autoplay {
    state: PlayState,
    interval_ms: u64,
    wrap: bool,
}

impl Autoplay {
    #[must_use]
    pub fn new(interval_ms: u64, wrap: bool) -> Self {
        Self {
            state: PlayState::Stopped,
            interval_ms,
            wrap,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    #[must_use]
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// Attempts `Stopped -> Playing`. Refuses for a track that cannot
    /// advance (fewer than two values).
    pub fn start(&mut self, track_len: usize) -> bool {
        if track_len <= 1 {
            return false;
        }
        self.state = PlayState::Playing;
        true
    }

    /// Unconditional `-> Stopped`. Used on direct stop, owner destruction
    /// and dataset replacement; a stale timer must never fire against a
    /// replaced value list.
    pub fn stop(&mut self) {
        self.state = PlayState::Stopped;
    }

    /// Changes the tick interval. The caller's timer reinstalls via
    /// subscription identity; playback state is unaffected.
    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// One timer tick: advances the cursor forward. Yields the new value,
    /// or `None` when playback ran out (non-wrapping, at the end), in which
    /// case the machine has transitioned back to `Stopped`.
    pub fn tick(&mut self, cursor: &mut ValueCursor) -> Option<String> {
        if self.state != PlayState::Playing {
            return None;
        }
        match cursor.step(StepDirection::Forward, self.wrap) {
            Some(value) => Some(value.to_string()),
            None => {
                self.stop();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> ValueCursor {
        ValueCursor::new(["3", "7", "11"], "3")
    }

    #[test]
    fn start_refuses_degenerate_tracks() {
        let mut autoplay = Autoplay::new(500, true);
        assert!(!autoplay.start(0));
        assert!(!autoplay.start(1));
        assert!(!autoplay.is_playing());
    }

    #[test]
    fn start_succeeds_with_two_or_more_values() {
        let mut autoplay = Autoplay::new(500, true);
        assert!(autoplay.start(2));
        assert!(autoplay.is_playing());
    }

    #[test]
    fn tick_advances_the_cursor() {
        let mut autoplay = Autoplay::new(500, true);
        let mut cursor = track();
        autoplay.start(cursor.len());

        assert_eq!(autoplay.tick(&mut cursor).as_deref(), Some("7"));
        assert_eq!(autoplay.tick(&mut cursor).as_deref(), Some("11"));
        // Wrapping policy: continues from the start.
        assert_eq!(autoplay.tick(&mut cursor).as_deref(), Some("3"));
        assert!(autoplay.is_playing());
    }

    #[test]
    fn non_wrapping_playback_runs_out_and_stops() {
        let mut autoplay = Autoplay::new(500, false);
        let mut cursor = track();
        autoplay.start(cursor.len());

        assert_eq!(autoplay.tick(&mut cursor).as_deref(), Some("7"));
        assert_eq!(autoplay.tick(&mut cursor).as_deref(), Some("11"));
        assert_eq!(autoplay.tick(&mut cursor), None);
        assert!(!autoplay.is_playing());
        // Further ticks are inert.
        assert_eq!(autoplay.tick(&mut cursor), None);
    }

    #[test]
    fn tick_while_stopped_does_nothing() {
        let mut autoplay = Autoplay::new(500, true);
        let mut cursor = track();
        assert_eq!(autoplay.tick(&mut cursor), None);
        assert_eq!(cursor.current(), "3");
    }

    #[test]
    fn interval_change_keeps_playback_state() {
        let mut autoplay = Autoplay::new(1000, true);
        autoplay.start(3);
        autoplay.set_interval_ms(500);
        assert!(autoplay.is_playing());
        assert_eq!(autoplay.interval(), Duration::from_millis(500));
    }

    #[test]
    fn stop_is_unconditional() {
        let mut autoplay = Autoplay::new(500, true);
        autoplay.start(3);
        autoplay.stop();
        assert!(!autoplay.is_playing());
    }
}
