//! Shimmer timer.
//!
//! Two states: `Calm` and `Shimmering`. A celebration (model selection)
//! shimmers for a fixed duration and then returns to calm on its own; the
//! manual toggle shimmers until toggled off. While shimmering, a recurring
//! pulse fires every `pulse_interval_ms`, counted from the moment the state
//! was entered. Leaving the state (deadline, toggle, cancel) drops any
//! pending pulses.
//!
//! Time is always passed in by the caller as milliseconds on the host clock.

use crate::domain::settings::ShimmerSettings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShimmerState {
    Calm,
    Shimmering {
        started_ms: f64,
        /// `None` when entered by the manual toggle.
        until_ms: Option<f64>,
        next_pulse_ms: f64,
    },
}

/// Result of advancing the timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShimmerTick {
    pub pulses: u32,
    /// True if the timer returned to `Calm` during this advance.
    pub ended: bool,
}

#[derive(Clone, Debug)]
pub struct ShimmerTimer {
    duration_ms: f64,
    interval_ms: f64,
    max_catch_up: u32,
    state: ShimmerState,
}

impl ShimmerTimer {
    pub fn new(settings: &ShimmerSettings) -> Self {
        Self {
            duration_ms: settings.duration_ms.max(0.0),
            // A zero interval would schedule infinitely many pulses.
            interval_ms: settings.pulse_interval_ms.max(1.0),
            max_catch_up: settings.max_catch_up_pulses.max(1),
            state: ShimmerState::Calm,
        }
    }

    pub fn state(&self) -> ShimmerState {
        self.state
    }

    pub fn is_shimmering(&self) -> bool {
        matches!(self.state, ShimmerState::Shimmering { .. })
    }

    /// Shimmer for the configured duration, restarting if already shimmering.
    pub fn celebrate(&mut self, now_ms: f64) {
        self.enter(now_ms, Some(now_ms + self.duration_ms));
    }

    /// Flip between calm and open-ended shimmering. Returns the new
    /// shimmering flag.
    ///
    /// Turning it off drops any celebration deadline. Turning it back on
    /// shimmers until the next toggle; a celebration cut short this way does
    /// not end itself at its old deadline.
    pub fn toggle(&mut self, now_ms: f64) -> bool {
        if self.is_shimmering() {
            self.state = ShimmerState::Calm;
        } else {
            self.enter(now_ms, None);
        }
        self.is_shimmering()
    }

    /// Stop immediately (teardown).
    pub fn cancel(&mut self) {
        self.state = ShimmerState::Calm;
    }

    /// Count the pulses due up to `now_ms` and leave the state once the
    /// deadline has passed. Pulses at or after the deadline never fire.
    pub fn advance(&mut self, now_ms: f64) -> ShimmerTick {
        let ShimmerState::Shimmering {
            started_ms,
            until_ms,
            mut next_pulse_ms,
        } = self.state
        else {
            return ShimmerTick::default();
        };

        let horizon = match until_ms {
            Some(until) => now_ms.min(until),
            None => now_ms,
        };

        let mut due = 0u32;
        let limit = until_ms.unwrap_or(f64::INFINITY);
        while next_pulse_ms <= horizon && next_pulse_ms < limit {
            due += 1;
            next_pulse_ms += self.interval_ms;
        }

        let ended = until_ms.is_some_and(|until| now_ms >= until);
        self.state = if ended {
            ShimmerState::Calm
        } else {
            ShimmerState::Shimmering {
                started_ms,
                until_ms,
                next_pulse_ms,
            }
        };

        ShimmerTick {
            pulses: due.min(self.max_catch_up),
            ended,
        }
    }

    fn enter(&mut self, now_ms: f64, until_ms: Option<f64>) {
        self.state = ShimmerState::Shimmering {
            started_ms: now_ms,
            until_ms,
            next_pulse_ms: now_ms + self.interval_ms,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> ShimmerTimer {
        ShimmerTimer::new(&ShimmerSettings::default())
    }

    #[test]
    fn starts_calm_and_calm_never_pulses() {
        let mut t = timer();
        assert!(!t.is_shimmering());
        assert_eq!(t.advance(10_000.0), ShimmerTick::default());
    }

    #[test]
    fn celebration_pulses_then_ends() {
        let mut t = timer();
        t.celebrate(1000.0);
        assert!(t.is_shimmering());

        let mut total = 0;
        let mut now = 1000.0;
        let mut ended_at = None;
        while now <= 2400.0 {
            let tick = t.advance(now);
            total += tick.pulses;
            if tick.ended && ended_at.is_none() {
                ended_at = Some(now);
            }
            now += 10.0;
        }

        // Pulses at +120 .. +1080; +1200 coincides with the deadline.
        assert_eq!(total, 9);
        assert_eq!(ended_at, Some(2200.0));
        assert!(!t.is_shimmering());
    }

    #[test]
    fn catch_up_is_bounded() {
        let mut t = timer();
        t.toggle(0.0);
        let tick = t.advance(5000.0);
        assert_eq!(tick.pulses, 3);
        assert!(!tick.ended);
        // Dropped pulses are not replayed later.
        assert_eq!(t.advance(5010.0).pulses, 0);
        assert_eq!(t.advance(5040.0).pulses, 1);
    }

    #[test]
    fn toggle_is_open_ended_and_reversible() {
        let mut t = timer();
        assert!(t.toggle(0.0));
        assert!(!t.advance(60_000.0).ended);
        assert!(t.is_shimmering());
        assert!(!t.toggle(60_001.0));
        assert_eq!(t.advance(70_000.0).pulses, 0);
    }

    #[test]
    fn toggle_off_cuts_a_celebration_short() {
        let mut t = timer();
        t.celebrate(0.0);
        assert!(!t.toggle(500.0));
        assert_eq!(t.advance(1000.0), ShimmerTick::default());
    }

    #[test]
    fn toggle_back_on_forgets_the_celebration_deadline() {
        let mut t = timer();
        t.celebrate(0.0);
        assert!(!t.toggle(300.0));
        assert!(t.toggle(400.0));
        assert!(!t.advance(1500.0).ended);
        assert!(t.is_shimmering());
    }

    #[test]
    fn reselection_restarts_the_clock() {
        let mut t = timer();
        t.celebrate(0.0);
        t.advance(1000.0);
        t.celebrate(1100.0);
        assert!(!t.advance(1300.0).ended);
        assert!(t.advance(2300.0).ended);
    }

    #[test]
    fn cancel_drops_pending_pulses() {
        let mut t = timer();
        t.celebrate(0.0);
        t.cancel();
        assert_eq!(t.advance(600.0).pulses, 0);
        assert_eq!(t.state(), ShimmerState::Calm);
    }
}
