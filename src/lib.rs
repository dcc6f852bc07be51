#![warn(missing_docs)]

//! # ring-timer
//!
//! A countdown timer component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: a circular progress ring with a moving indicator dot and an
//! `MM:SS` readout, started, paused and reset from the keyboard.
//!
//! ## Overview
//!
//! The crate is split into small layers that can be used on their own:
//!
//! - [`format`]: the `MM:SS` readout
//! - [`geometry`]: progress-to-angle math producing a [`geometry::DrawPlan`]
//! - [`timer`]: the immutable [`Timer`] snapshot and its state machine
//! - [`animation`]: the [`animation::AnimationDriver`] contract and the tick-driven [`animation::Tween`]
//! - [`pulse`]: the fading label oscillator
//! - [`canvas`]: rasterizes a draw plan onto terminal cells
//! - [`view`]: the Elm-architecture screen tying everything together
//!
//! ## Quick Start
//!
//! ```rust
//! use ring_timer::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     screen: TimerScreen,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let screen = timer_screen_new(&[with_duration(SHORT_DURATION)]);
//!         (Self { screen }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.screen.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.screen.view()
//!     }
//! }
//! ```
//!
//! ## State Machine
//!
//! ```rust
//! use ring_timer::{Timer, TimerState};
//! use std::time::Duration;
//!
//! let timer = Timer::new(Duration::from_secs(5));
//! let timer = timer.press();
//! assert_eq!(timer.state, TimerState::Running);
//!
//! let timer = timer.with_progress(0.5).press();
//! assert_eq!(timer.state, TimerState::Paused);
//! assert_eq!(timer.remaining_millis(), 2_500);
//! ```

pub mod animation;
pub mod canvas;
pub mod format;
pub mod geometry;
pub mod help;
pub mod key;
pub mod pulse;
pub mod timer;
pub mod view;

pub use animation::{AnimationDriver, Easing, FrameMsg as TweenFrameMsg, Tween};
pub use canvas::{Canvas, Layer, Palette};
pub use format::time_string;
pub use geometry::{plan, DrawPlan, Size, Tone};
pub use key::{Binding, Help as KeyHelp, KeyPress};
pub use pulse::{Model as Pulse, PulseMsg};
pub use timer::{
    PrimaryIcon, Timer, TimerState, DEFAULT_DURATION, RESET_DELAY, SHORT_DURATION,
};
pub use view::{
    new as timer_screen_new, with_duration, with_key_map, with_palette, with_size,
    without_completion, KeyMap as TimerKeyMap, Model as TimerScreen, ResetDoneMsg, TimerOption,
    TIME_UP,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use ring_timer::prelude::*;
///
/// let screen = timer_screen_new(&[with_duration(SHORT_DURATION)]);
/// assert_eq!(screen.timer().state, TimerState::Idle);
/// ```
pub mod prelude {
    pub use crate::animation::{AnimationDriver, Easing, Tween};
    pub use crate::format::time_string;
    pub use crate::geometry::{plan, DrawPlan, Size};
    pub use crate::key::Binding;
    pub use crate::timer::{
        PrimaryIcon, Timer, TimerState, DEFAULT_DURATION, RESET_DELAY, SHORT_DURATION,
    };
    pub use crate::view::{
        new as timer_screen_new, with_duration, with_size, without_completion,
        KeyMap as TimerKeyMap, Model as TimerScreen,
    };
}
