use std::time::{Duration, Instant};

use crate::config::PLAYBACK_INTERVAL;

// ---------------------------------------------------------------------------
// Year advancement
// ---------------------------------------------------------------------------

/// The year after `current` in `years`, wrapping to the first after the last.
/// An unknown `current` restarts from the first year.
pub fn next_year(years: &[String], current: &str) -> Option<String> {
    if years.is_empty() {
        return None;
    }
    let next = years
        .iter()
        .position(|y| y == current)
        .map(|i| (i + 1) % years.len())
        .unwrap_or(0);
    Some(years[next].clone())
}

// ---------------------------------------------------------------------------
// Playback timer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// A scheduled repeating tick. Holding one is what "playing" means; dropping
/// it cancels every future tick.
#[derive(Debug)]
struct TickTimer {
    due: Instant,
}

/// Advances the selected year on a fixed cadence while playing.
///
/// The UI loop drives it by calling [`SelectionAnimator::tick`] every frame
/// with the current time; at most one timer exists at a time.
#[derive(Debug)]
pub struct SelectionAnimator {
    interval: Duration,
    timer: Option<TickTimer>,
}

impl Default for SelectionAnimator {
    fn default() -> Self {
        Self::new(PLAYBACK_INTERVAL)
    }
}

impl SelectionAnimator {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timer: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        if self.timer.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    /// Start playback. Any existing timer is replaced, never duplicated.
    pub fn start(&mut self, now: Instant) {
        self.timer = Some(TickTimer {
            due: now + self.interval,
        });
        log::debug!("Playback started ({:?} per year)", self.interval);
    }

    /// Cancel playback. Returns whether a timer was running; calling it
    /// again is a no-op.
    pub fn stop(&mut self) -> bool {
        let was_playing = self.timer.take().is_some();
        if was_playing {
            log::debug!("Playback stopped");
        }
        was_playing
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Time left before the next tick, for scheduling a repaint.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer
            .as_ref()
            .map(|t| t.due.saturating_duration_since(now))
    }

    /// Fire the timer if it is due and move `current` to the next year.
    /// Returns whether the selection changed.
    ///
    /// One call advances at most one year; if several intervals were missed
    /// the next tick is rescheduled one interval from `now`.
    pub fn tick(&mut self, now: Instant, years: &[String], current: &mut String) -> bool {
        let interval = self.interval;
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        if now < timer.due {
            return false;
        }

        timer.due += interval;
        if timer.due <= now {
            timer.due = now + interval;
        }

        match next_year(years, current) {
            Some(next) if next != *current => {
                *current = next;
                true
            }
            _ => false,
        }
    }
}
