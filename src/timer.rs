//! Countdown timer state machine.
//!
//! A [`Timer`] is an immutable snapshot: every transition consumes the current
//! value and returns the next one, so a consumer never observes a half-applied
//! change (for example `Complete` with progress below 1.0).
//!
//! # Transitions
//!
//! | Current state    | Primary press | Next state                 |
//! |------------------|---------------|----------------------------|
//! | `Idle`, `Paused` | press         | `Running`                  |
//! | `Running`        | press         | `Paused`                   |
//! | `Complete`       | press         | `Running`, progress reset  |
//!
//! Reset works in any state and takes two steps: [`Timer::begin_reset`] zeroes
//! the progress and raises the `resetting` flag, then [`Timer::finish_reset`]
//! (scheduled [`RESET_DELAY`] later) lowers the flag and sends a paused or
//! completed timer back to `Idle`. The gap leaves room for the animation driver
//! to be snapped to zero before it is allowed to run again.
//!
//! ```rust
//! use ring_timer::timer::{Timer, TimerState, SHORT_DURATION};
//!
//! let timer = Timer::new(SHORT_DURATION).press();
//! assert_eq!(timer.state, TimerState::Running);
//!
//! let timer = timer.complete();
//! assert_eq!(timer.state, TimerState::Complete);
//! assert_eq!(timer.remaining_millis(), 0);
//!
//! let timer = timer.press();
//! assert_eq!(timer.state, TimerState::Running);
//! assert_eq!(timer.progress, 0.0);
//! ```

use std::time::Duration;

/// Countdown length used by the timer screen unless configured otherwise.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(30);

/// Short countdown, handy for seeing completion without waiting.
pub const SHORT_DURATION: Duration = Duration::from_secs(5);

/// Delay between the two phases of a reset.
pub const RESET_DELAY: Duration = Duration::from_millis(300);

/// Lifecycle state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    /// Not started, or sent back after a reset.
    #[default]
    Idle,
    /// Counting down.
    Running,
    /// Stopped part-way; pressing resumes from the same progress.
    Paused,
    /// Progress reached 1.0.
    Complete,
}

/// Glyph shown on the primary button for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryIcon {
    /// Start or resume.
    Play,
    /// Pause a running countdown.
    Pause,
    /// Start over after completion.
    Restart,
}

impl PrimaryIcon {
    /// Terminal glyph for the icon.
    pub fn glyph(self) -> &'static str {
        match self {
            PrimaryIcon::Play => "▶",
            PrimaryIcon::Pause => "⏸",
            PrimaryIcon::Restart => "↻",
        }
    }

    /// Verb describing what pressing the button will do.
    pub fn action(self) -> &'static str {
        match self {
            PrimaryIcon::Play => "start",
            PrimaryIcon::Pause => "pause",
            PrimaryIcon::Restart => "restart",
        }
    }
}

/// Snapshot of the countdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    /// Total countdown length in milliseconds. Never zero.
    pub duration_millis: u64,
    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub progress: f32,
    /// True between the two phases of a reset.
    pub resetting: bool,
    /// Current lifecycle state.
    pub state: TimerState,
}

impl Timer {
    /// Creates an idle timer for `duration`.
    ///
    /// # Panics
    ///
    /// Panics if `duration` rounds down to zero milliseconds or does not fit
    /// in a `u64` count of milliseconds.
    pub fn new(duration: Duration) -> Self {
        let duration_millis = u64::try_from(duration.as_millis()).unwrap_or(0);
        assert!(
            duration_millis > 0,
            "timer duration must be positive and fit in u64 milliseconds"
        );

        Self {
            duration_millis,
            progress: 0.0,
            resetting: false,
            state: TimerState::Idle,
        }
    }

    /// Applies a press of the primary button.
    pub fn press(self) -> Self {
        match self.state {
            TimerState::Idle | TimerState::Paused => Self {
                state: TimerState::Running,
                ..self
            },
            TimerState::Running => Self {
                state: TimerState::Paused,
                ..self
            },
            TimerState::Complete => Self {
                state: TimerState::Running,
                progress: 0.0,
                ..self
            },
        }
    }

    /// First phase of a reset: progress to zero, flag raised, state untouched.
    pub fn begin_reset(self) -> Self {
        Self {
            progress: 0.0,
            resetting: true,
            ..self
        }
    }

    /// Second phase of a reset: flag lowered, paused or completed timers go idle.
    pub fn finish_reset(self) -> Self {
        let state = match self.state {
            TimerState::Paused | TimerState::Complete => TimerState::Idle,
            other => other,
        };

        Self {
            resetting: false,
            state,
            ..self
        }
    }

    /// Records progress reported by the animation driver, clamped to `[0, 1]`.
    pub fn with_progress(self, progress: f32) -> Self {
        Self {
            progress: progress.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Marks the countdown finished: progress 1.0 and `Complete` together.
    pub fn complete(self) -> Self {
        Self {
            progress: 1.0,
            state: TimerState::Complete,
            ..self
        }
    }

    /// Total countdown length.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_millis)
    }

    /// Milliseconds left on the clock, `duration - trunc(duration * progress)`.
    pub fn remaining_millis(&self) -> u64 {
        let elapsed = (self.duration_millis as f64 * self.progress as f64) as u64;
        self.duration_millis.saturating_sub(elapsed)
    }

    /// How long an animation from the current progress to 1.0 should take.
    ///
    /// Restarting with this duration keeps the pace at one full revolution
    /// per [`Timer::duration`] across pauses.
    pub fn remaining_animation(&self) -> Duration {
        Duration::from_millis(self.remaining_millis())
    }

    /// Whether the labels should pulse in this state.
    pub fn pulses(&self) -> bool {
        matches!(self.state, TimerState::Paused | TimerState::Complete)
    }

    /// Icon for the primary button.
    pub fn primary_icon(&self) -> PrimaryIcon {
        match self.state {
            TimerState::Running => PrimaryIcon::Pause,
            TimerState::Complete => PrimaryIcon::Restart,
            TimerState::Idle | TimerState::Paused => PrimaryIcon::Play,
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer() {
        let timer = Timer::new(DEFAULT_DURATION);
        assert_eq!(timer.duration_millis, 30_000);
        assert_eq!(timer.progress, 0.0);
        assert!(!timer.resetting);
        assert_eq!(timer.state, TimerState::Idle);
        assert_eq!(timer.remaining_millis(), 30_000);
    }

    #[test]
    #[should_panic(expected = "timer duration must be positive")]
    fn test_zero_duration_panics() {
        let _ = Timer::new(Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "fit in u64 milliseconds")]
    fn test_oversized_duration_panics() {
        let _ = Timer::new(Duration::MAX);
    }

    #[test]
    fn test_press_cycle() {
        let idle = Timer::new(SHORT_DURATION);
        let running = idle.press();
        assert_eq!(running.state, TimerState::Running);

        let paused = running.with_progress(0.4).press();
        assert_eq!(paused.state, TimerState::Paused);
        assert_eq!(paused.progress, 0.4);

        let resumed = paused.press();
        assert_eq!(resumed.state, TimerState::Running);
        assert_eq!(resumed.progress, 0.4);
    }

    #[test]
    fn test_press_from_complete_restarts() {
        let timer = Timer::new(SHORT_DURATION).press().complete().press();
        assert_eq!(timer.state, TimerState::Running);
        assert_eq!(timer.progress, 0.0);
    }

    #[test]
    fn test_complete_sets_progress_and_state_together() {
        let timer = Timer::new(SHORT_DURATION).press().with_progress(0.9).complete();
        assert_eq!(timer.progress, 1.0);
        assert_eq!(timer.state, TimerState::Complete);
    }

    #[test]
    fn test_reset_phases_from_each_state() {
        let cases = [
            (TimerState::Idle, TimerState::Idle),
            (TimerState::Running, TimerState::Running),
            (TimerState::Paused, TimerState::Idle),
            (TimerState::Complete, TimerState::Idle),
        ];

        for (before, after) in cases {
            let timer = Timer {
                state: before,
                progress: 0.6,
                ..Timer::new(SHORT_DURATION)
            };

            let first = timer.begin_reset();
            assert_eq!(first.progress, 0.0, "{:?}", before);
            assert!(first.resetting, "{:?}", before);
            assert_eq!(first.state, before, "state must not change until the delay passes");

            let second = first.finish_reset();
            assert!(!second.resetting, "{:?}", before);
            assert_eq!(second.state, after, "{:?}", before);
            assert_eq!(second.progress, 0.0);
        }
    }

    #[test]
    fn test_reset_twice_matches_reset_once() {
        let timer = Timer::new(SHORT_DURATION).press().with_progress(0.5).press();
        let once = timer.begin_reset();
        let twice = timer.begin_reset().begin_reset();
        assert_eq!(once, twice);
        assert_eq!(once.finish_reset(), twice.finish_reset());
    }

    #[test]
    fn test_progress_is_clamped() {
        let timer = Timer::new(SHORT_DURATION);
        assert_eq!(timer.with_progress(1.5).progress, 1.0);
        assert_eq!(timer.with_progress(-0.5).progress, 0.0);
    }

    #[test]
    fn test_remaining_time() {
        let timer = Timer::new(SHORT_DURATION).with_progress(0.5);
        assert_eq!(timer.remaining_millis(), 2_500);
        assert_eq!(timer.remaining_animation(), Duration::from_millis(2_500));

        let done = timer.complete();
        assert_eq!(done.remaining_millis(), 0);
        assert_eq!(done.remaining_animation(), Duration::ZERO);
    }

    #[test]
    fn test_primary_icon_follows_state() {
        let idle = Timer::new(SHORT_DURATION);
        assert_eq!(idle.primary_icon(), PrimaryIcon::Play);
        assert_eq!(idle.press().primary_icon(), PrimaryIcon::Pause);
        assert_eq!(idle.press().press().primary_icon(), PrimaryIcon::Play);
        assert_eq!(idle.press().complete().primary_icon(), PrimaryIcon::Restart);
        assert_eq!(PrimaryIcon::Restart.action(), "restart");
    }

    #[test]
    fn test_pulses_only_when_paused_or_complete() {
        let idle = Timer::new(SHORT_DURATION);
        assert!(!idle.pulses());
        assert!(!idle.press().pulses());
        assert!(idle.press().press().pulses());
        assert!(idle.press().complete().pulses());
    }
}
