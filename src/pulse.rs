//! Pulsing alpha for the timer labels.
//!
//! While the countdown is paused or complete, the readout fades out and back
//! in on a fixed cycle. [`Model`] is a small tick-driven oscillator in the
//! same style as the other animated components: it schedules [`PulseMsg`]
//! ticks, tags each one with a generation counter and drops ticks from an
//! earlier generation after a stop or restart.
//!
//! ```rust
//! use ring_timer::pulse::{Model, PULSE_PERIOD};
//!
//! let mut pulse = Model::new();
//! assert_eq!(pulse.alpha(), 1.0);
//!
//! let _cmd = pulse.start();
//! assert!(pulse.running());
//! assert!(pulse.alpha_at(PULSE_PERIOD / 2) < 1e-4);
//! ```

use crate::animation::Easing;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Length of one full fade-out and fade-in cycle.
pub const PULSE_PERIOD: Duration = Duration::from_millis(700);

const FPS: u64 = 30;

/// Tick message for a running pulse.
#[derive(Debug, Clone)]
pub struct PulseMsg {
    /// Identifier of the pulse that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Alpha oscillator: 1.0 → 0.0 → 1.0 every [`PULSE_PERIOD`].
#[derive(Debug, Clone)]
pub struct Model {
    /// Time between ticks.
    pub interval: Duration,
    elapsed: Duration,
    running: bool,
    id: i64,
    tag: i64,
}

impl Model {
    /// Creates a stopped pulse at full alpha.
    pub fn new() -> Self {
        Self {
            interval: Duration::from_nanos(1_000_000_000 / FPS),
            elapsed: Duration::ZERO,
            running: false,
            id: next_id(),
            tag: 0,
        }
    }

    /// Unique identifier used to route tick messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether the pulse is currently oscillating.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Starts (or restarts) the cycle from full alpha.
    pub fn start(&mut self) -> Cmd {
        self.tag += 1;
        self.elapsed = Duration::ZERO;
        self.running = true;
        self.tick()
    }

    /// Stops the cycle; pending ticks are ignored and alpha returns to 1.0.
    pub fn stop(&mut self) {
        self.tag += 1;
        self.elapsed = Duration::ZERO;
        self.running = false;
    }

    /// Current alpha in `[0, 1]`. Always 1.0 while stopped.
    pub fn alpha(&self) -> f32 {
        if !self.running {
            return 1.0;
        }
        self.alpha_at(self.elapsed)
    }

    /// Alpha `elapsed` into the cycle.
    pub fn alpha_at(&self, elapsed: Duration) -> f32 {
        let period = PULSE_PERIOD.as_secs_f32();
        let phase = (elapsed.as_secs_f32() % period) / period;

        // First half fades out, second half fades back in
        if phase < 0.5 {
            1.0 - Easing::EaseInOut.apply(phase * 2.0)
        } else {
            Easing::EaseInOut.apply((phase - 0.5) * 2.0)
        }
    }

    /// Advances the cycle on a matching [`PulseMsg`] and schedules the next tick.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let pulse_msg = msg.downcast_ref::<PulseMsg>()?;
        if !self.running || pulse_msg.id != self.id || pulse_msg.tag != self.tag {
            return None;
        }

        self.elapsed += self.interval;
        Some(self.tick())
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;

        bubbletea_tick(self.interval, move |_| Box::new(PulseMsg { id, tag }) as Msg)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
