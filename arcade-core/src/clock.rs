//! Frame clock for the loop driver.
//!
//! The host hands in display-refresh timestamps in milliseconds. Physics gets
//! the clamped step so a hitch or a suspended tab never produces one huge
//! integration step; timed state (cooldowns, invincibility, power-ups) runs on
//! the unclamped session clock so those windows keep wall-clock length.

use crate::constants::MAX_DELTA_SEC;

/// One tick worth of time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStep {
    /// Clamped physics step in seconds, within `[0, max_delta]`.
    pub dt_sec: f32,
    /// Wall time since the previous tick in milliseconds.
    pub elapsed_ms: f64,
}

impl FrameStep {
    pub const ZERO: Self = Self {
        dt_sec: 0.0,
        elapsed_ms: 0.0,
    };
}

#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last_tick_ms: Option<f64>,
    max_delta_sec: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_DELTA_SEC)
    }
}

impl FrameClock {
    pub fn new(max_delta_sec: f32) -> Self {
        Self {
            last_tick_ms: None,
            max_delta_sec,
        }
    }

    /// The next tick becomes the baseline and yields a zero step.
    pub fn rearm(&mut self) {
        self.last_tick_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.last_tick_ms.is_some()
    }

    pub fn advance(&mut self, now_ms: f64) -> FrameStep {
        let Some(last) = self.last_tick_ms.replace(now_ms) else {
            return FrameStep::ZERO;
        };

        // Timestamps running backwards count as no time passing.
        let elapsed_ms = (now_ms - last).max(0.0);
        let dt_sec = ((elapsed_ms / 1_000.0) as f32).clamp(0.0, self.max_delta_sec);
        FrameStep { dt_sec, elapsed_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_a_zero_step() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(12_345.0), FrameStep::ZERO);
        assert!(clock.is_armed());
    }

    #[test]
    fn regular_frames_pass_through() {
        let mut clock = FrameClock::default();
        clock.advance(1_000.0);
        let step = clock.advance(1_016.0);
        assert!((step.dt_sec - 0.016).abs() < 1e-6);
        assert_eq!(step.elapsed_ms, 16.0);
    }

    #[test]
    fn long_gaps_are_clamped_for_physics_only() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        let step = clock.advance(5_000.0);
        assert_eq!(step.dt_sec, MAX_DELTA_SEC);
        assert_eq!(step.elapsed_ms, 5_000.0);
    }

    #[test]
    fn backwards_timestamps_clamp_to_zero() {
        let mut clock = FrameClock::default();
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), FrameStep::ZERO);
    }

    #[test]
    fn rearm_discards_the_gap() {
        let mut clock = FrameClock::default();
        clock.advance(100.0);
        clock.rearm();
        assert_eq!(clock.advance(90_000.0), FrameStep::ZERO);
        let step = clock.advance(90_020.0);
        assert_eq!(step.elapsed_ms, 20.0);
    }
}
