//! Tick-driven scalar interpolation for the countdown ring.
//!
//! [`Tween`] interpolates a single `f32` from its current value to a target
//! over a wall-clock duration, emitting a [`FrameMsg`] roughly sixty times a
//! second. Every call to [`AnimationDriver::snap_to`] or
//! [`AnimationDriver::animate_to`] bumps the tween's generation tag, so frames
//! scheduled by an earlier call are ignored when they arrive: the last call
//! wins.
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Msg};
//! use ring_timer::animation::{AnimationDriver, Easing, Tween};
//! use std::time::Duration;
//!
//! struct Ring {
//!     progress: f32,
//!     tween: Tween,
//! }
//!
//! impl Ring {
//!     fn start(&mut self) -> Cmd {
//!         self.tween.animate_to(1.0, Duration::from_secs(30), Easing::Linear)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         let (value, next) = self.tween.update(msg)?;
//!         self.progress = value;
//!         next
//!     }
//! }
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

// Internal ID management for tween instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const FPS: u64 = 60;

/// Shape of an interpolation over its normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant rate.
    #[default]
    Linear,
    /// Slow start and slow finish (smoothstep).
    EaseInOut,
}

impl Easing {
    /// Maps normalized time `t` in `[0, 1]` to normalized progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Contract between the timer and whatever animates its progress value.
///
/// Implementations cancel any in-flight interpolation whenever either
/// operation is called.
pub trait AnimationDriver {
    /// The value most recently produced by the driver.
    fn value(&self) -> f32;

    /// Sets the value immediately, cancelling any in-flight interpolation.
    fn snap_to(&mut self, value: f32);

    /// Starts interpolating from the current value to `target` over `duration`.
    ///
    /// Replaces any previous interpolation and returns the command that
    /// delivers the first frame.
    fn animate_to(&mut self, target: f32, duration: Duration, easing: Easing) -> Cmd;
}

/// Frame message for a running [`Tween`].
///
/// Carries the tween's id and the generation tag it was scheduled under.
/// Frames with a stale tag are dropped by [`Tween::update`].
#[derive(Debug, Clone)]
pub struct FrameMsg {
    /// Identifier of the tween that scheduled this frame.
    pub id: i64,
    tag: i64,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    from: f32,
    target: f32,
    duration: Duration,
    easing: Easing,
    started: Instant,
}

/// Linear-by-default scalar tween driven by bubbletea ticks.
#[derive(Debug, Clone)]
pub struct Tween {
    id: i64,
    tag: i64,
    value: f32,
    segment: Option<Segment>,
}

impl Tween {
    /// Creates an idle tween resting at `value`.
    pub fn new(value: f32) -> Self {
        Self {
            id: next_id(),
            tag: 0,
            value,
            segment: None,
        }
    }

    /// Unique identifier used to route frame messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether an interpolation is in flight.
    pub fn is_animating(&self) -> bool {
        self.segment.is_some()
    }

    /// Target of the in-flight interpolation, if any.
    pub fn target(&self) -> Option<f32> {
        self.segment.map(|s| s.target)
    }

    /// Total duration of the in-flight interpolation, if any.
    pub fn duration(&self) -> Option<Duration> {
        self.segment.map(|s| s.duration)
    }

    /// Interpolated value `elapsed` into the in-flight segment.
    ///
    /// Returns the resting value when nothing is animating. Reaches the
    /// target exactly once `elapsed >= duration`.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let Some(seg) = self.segment else {
            return self.value;
        };
        if seg.duration.is_zero() || elapsed >= seg.duration {
            return seg.target;
        }

        let t = elapsed.as_secs_f32() / seg.duration.as_secs_f32();
        seg.from + (seg.target - seg.from) * seg.easing.apply(t)
    }

    /// Handles a [`FrameMsg`] addressed to this tween.
    ///
    /// Returns the new value and, while the target has not been reached, the
    /// command for the next frame. Returns `None` for foreign or stale
    /// messages and when idle.
    pub fn update(&mut self, msg: Msg) -> Option<(f32, Option<Cmd>)> {
        let frame = msg.downcast_ref::<FrameMsg>()?;
        let elapsed = self.segment?.started.elapsed();
        self.advance(frame, elapsed)
    }

    fn advance(&mut self, frame: &FrameMsg, elapsed: Duration) -> Option<(f32, Option<Cmd>)> {
        if frame.id != self.id || frame.tag != self.tag {
            return None;
        }
        let seg = self.segment?;

        self.value = self.value_at(elapsed);
        if elapsed >= seg.duration {
            self.segment = None;
            return Some((self.value, None));
        }

        Some((self.value, Some(self.next_frame())))
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let duration = Duration::from_nanos(1_000_000_000 / FPS);

        bubbletea_tick(duration, move |_| Box::new(FrameMsg { id, tag }) as Msg)
    }

    #[cfg(test)]
    fn frame_msg(&self) -> FrameMsg {
        FrameMsg {
            id: self.id,
            tag: self.tag,
        }
    }
}

impl AnimationDriver for Tween {
    fn value(&self) -> f32 {
        self.value
    }

    fn snap_to(&mut self, value: f32) {
        self.tag += 1;
        self.segment = None;
        self.value = value;
    }

    fn animate_to(&mut self, target: f32, duration: Duration, easing: Easing) -> Cmd {
        self.tag += 1;
        self.segment = Some(Segment {
            from: self.value,
            target,
            duration,
            easing,
            started: Instant::now(),
        });
        self.next_frame()
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(0.0)
    }
}
