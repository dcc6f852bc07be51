//! Countdown timer screen for Bubble Tea applications.
//!
//! [`Model`] composes the timer state machine, the progress tween, the label
//! pulse and the ring canvas into one component. Key presses drive the state
//! machine; after every transition the model decides whether the tween must be
//! (re)started or stopped and whether the labels should pulse, and returns the
//! commands that keep those animations going.
//!
//! # Basic Usage
//!
//! ```rust
//! use ring_timer::view::{new, with_duration};
//! use ring_timer::timer::{TimerState, SHORT_DURATION};
//!
//! let mut screen = new(&[with_duration(SHORT_DURATION)]);
//! assert_eq!(screen.timer().state, TimerState::Idle);
//!
//! let _cmd = screen.press();
//! assert_eq!(screen.timer().state, TimerState::Running);
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use ring_timer::view::Model as TimerScreen;
//!
//! struct App {
//!     screen: TimerScreen,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (Self { screen: TimerScreen::default() }, None)
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
//! # Keys
//!
//! | Key               | Action                          |
//! |-------------------|---------------------------------|
//! | `space`, `enter`  | start / pause / restart         |
//! | `r`               | reset                           |
//! | `q`, `ctrl+c`     | quit                            |

use crate::animation::{AnimationDriver, Easing, FrameMsg, Tween};
use crate::canvas::{Canvas, Palette};
use crate::format::time_string;
use crate::geometry::DrawPlan;
use crate::help;
use crate::key::Binding;
use crate::pulse::{self, PulseMsg};
use crate::timer::{Timer, TimerState, DEFAULT_DURATION, RESET_DELAY};
use bubbletea_rs::{
    tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg,
};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Label shown under the readout once the countdown completes.
pub const TIME_UP: &str = "Time Up!";

const DEFAULT_COLS: usize = 33;
const DEFAULT_ROWS: usize = 16;
const MIN_COLS: usize = 11;
const MIN_ROWS: usize = 6;
// Blank line, button row and help line below the ring
const CHROME_ROWS: usize = 3;

/// Key bindings for the timer screen.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Start, pause or restart. Its help text follows the timer state.
    pub primary: Binding,
    /// Two-phase reset.
    pub reset: Binding,
    /// Quit the program.
    pub quit: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            primary: Binding::new(vec![KeyCode::Char(' '), KeyCode::Enter])
                .with_help("space", "start"),
            reset: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
            quit: Binding::new(vec![
                (KeyCode::Char('q'), KeyModifiers::NONE),
                (KeyCode::Char('c'), KeyModifiers::CONTROL),
            ])
            .with_help("q", "quit"),
        }
    }
}

impl help::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.primary, &self.reset, &self.quit]
    }
}

/// Delivered [`RESET_DELAY`] after a reset to run its second phase.
///
/// Only the message from the most recent reset is honored.
#[derive(Debug, Clone)]
pub struct ResetDoneMsg {
    /// Identifier of the screen that scheduled the reset.
    pub id: i64,
    tag: i64,
}

/// Configuration options for [`new`].
#[derive(Debug, Clone)]
pub enum TimerOption {
    /// Countdown length.
    WithDuration(Duration),
    /// Never enter `Complete`; the ring simply stops at 1.0.
    WithoutCompletion,
    /// Ring size in cells.
    WithSize(usize, usize),
    /// Ring and label colors.
    WithPalette(Palette),
    /// Key bindings.
    WithKeyMap(Box<KeyMap>),
}

impl TimerOption {
    fn apply(&self, m: &mut Model) {
        match self {
            TimerOption::WithDuration(duration) => m.timer = Timer::new(*duration),
            TimerOption::WithoutCompletion => m.completion = false,
            TimerOption::WithSize(cols, rows) => {
                m.cols = (*cols).max(MIN_COLS);
                m.rows = (*rows).max(MIN_ROWS);
            }
            TimerOption::WithPalette(palette) => m.palette = palette.clone(),
            TimerOption::WithKeyMap(keymap) => m.keymap = keymap.as_ref().clone(),
        }
    }
}

/// Sets the countdown length.
///
/// # Panics
///
/// [`new`] panics if the duration is shorter than one millisecond.
pub fn with_duration(duration: Duration) -> TimerOption {
    TimerOption::WithDuration(duration)
}

/// Disables the `Complete` state and the "Time Up!" label.
pub fn without_completion() -> TimerOption {
    TimerOption::WithoutCompletion
}

/// Sets the ring size in terminal cells.
pub fn with_size(cols: usize, rows: usize) -> TimerOption {
    TimerOption::WithSize(cols, rows)
}

/// Sets the colors.
pub fn with_palette(palette: Palette) -> TimerOption {
    TimerOption::WithPalette(palette)
}

/// Replaces the key bindings.
pub fn with_key_map(keymap: KeyMap) -> TimerOption {
    TimerOption::WithKeyMap(Box::new(keymap))
}

/// Countdown timer screen.
#[derive(Debug, Clone)]
pub struct Model {
    /// Key bindings.
    pub keymap: KeyMap,
    /// Help line renderer.
    pub help: help::Model,
    /// Colors.
    pub palette: Palette,

    timer: Timer,
    tween: Tween,
    pulse: pulse::Model,
    completion: bool,
    cols: usize,
    rows: usize,
    id: i64,
    reset_tag: i64,
}

/// Creates a timer screen with the given options applied in order.
///
/// # Examples
///
/// ```rust
/// use ring_timer::view::{new, with_duration, with_size, without_completion};
/// use std::time::Duration;
///
/// let screen = new(&[]);
/// assert_eq!(screen.timer().duration_millis, 30_000);
///
/// let short = new(&[
///     with_duration(Duration::from_secs(5)),
///     without_completion(),
///     with_size(41, 20),
/// ]);
/// assert_eq!(short.timer().duration_millis, 5_000);
/// assert_eq!(short.size(), (41, 20));
/// ```
pub fn new(opts: &[TimerOption]) -> Model {
    let mut m = Model {
        keymap: KeyMap::default(),
        help: help::Model::new(),
        palette: Palette::default(),
        timer: Timer::new(DEFAULT_DURATION),
        tween: Tween::new(0.0),
        pulse: pulse::Model::new(),
        completion: true,
        cols: DEFAULT_COLS,
        rows: DEFAULT_ROWS,
        id: next_id(),
        reset_tag: 0,
    };

    for opt in opts {
        opt.apply(&mut m);
    }
    m.refresh_primary_help();

    m
}

impl Model {
    /// Unique identifier used to route reset messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current timer snapshot.
    pub fn timer(&self) -> Timer {
        self.timer
    }

    /// Ring size in cells as `(cols, rows)`.
    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Resizes the ring to fit a terminal of `width` × `height` cells.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.cols = width.max(MIN_COLS);
        self.rows = height.saturating_sub(CHROME_ROWS).max(MIN_ROWS);
        self.help.width = width;
    }

    /// Presses the primary button.
    pub fn press(&mut self) -> Option<Cmd> {
        self.timer = self.timer.press();
        self.sync_animations()
    }

    /// Starts a reset: zeroes the ring now and schedules the second phase.
    pub fn reset(&mut self) -> Cmd {
        self.timer = self.timer.begin_reset();
        self.tween.snap_to(0.0);
        self.reset_tag += 1;

        let id = self.id;
        let tag = self.reset_tag;
        bubbletea_tick(RESET_DELAY, move |_| Box::new(ResetDoneMsg { id, tag }) as Msg)
    }

    fn finish_reset(&mut self) -> Option<Cmd> {
        self.timer = self.timer.finish_reset();
        self.sync_animations()
    }

    // Progress reported by the tween; completion lands in the same snapshot
    fn apply_progress(&mut self, value: f32) -> Option<Cmd> {
        self.timer = if value >= 1.0 && self.completion {
            self.timer.complete()
        } else {
            self.timer.with_progress(value)
        };
        self.sync_animations()
    }

    // Starts or stops the tween and the pulse to match the current snapshot.
    fn sync_animations(&mut self) -> Option<Cmd> {
        let mut cmds = Vec::new();

        let should_animate = self.timer.state == TimerState::Running
            && !self.timer.resetting
            && self.timer.progress < 1.0;
        if should_animate && !self.tween.is_animating() {
            self.tween.snap_to(self.timer.progress);
            cmds.push(self.tween.animate_to(
                1.0,
                self.timer.remaining_animation(),
                Easing::Linear,
            ));
        } else if !should_animate && self.tween.is_animating() {
            self.tween.snap_to(self.timer.progress);
        }

        if self.timer.pulses() && !self.pulse.running() {
            cmds.push(self.pulse.start());
        } else if !self.timer.pulses() && self.pulse.running() {
            self.pulse.stop();
        }

        self.refresh_primary_help();
        combine(cmds)
    }

    fn refresh_primary_help(&mut self) {
        let key = self.keymap.primary.help().key.clone();
        self.keymap
            .primary
            .set_help(key, self.timer.primary_icon().action());
    }

    /// Handles key presses, animation frames, pulse ticks, reset completion
    /// and window resizes.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.quit.matches(key_msg) {
                return Some(bubbletea_rs::quit());
            }
            if self.keymap.primary.matches(key_msg) {
                return self.press();
            }
            if self.keymap.reset.matches(key_msg) {
                return Some(self.reset());
            }
            return None;
        }

        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.set_size(size.width as usize, size.height as usize);
            return None;
        }

        if let Some(done) = msg.downcast_ref::<ResetDoneMsg>() {
            if done.id != self.id || done.tag != self.reset_tag {
                return None;
            }
            return self.finish_reset();
        }

        if msg.is::<PulseMsg>() {
            return self.pulse.update(msg);
        }

        if msg.is::<FrameMsg>() {
            let (value, next) = self.tween.update(msg)?;
            let mut cmds: Vec<Cmd> = next.into_iter().collect();
            cmds.extend(self.apply_progress(value));
            return combine(cmds);
        }

        None
    }

    /// Renders the ring with its readout, the button row and the help line.
    pub fn view(&self) -> String {
        let mut canvas = Canvas::new(self.cols, self.rows);
        canvas.paint(&DrawPlan::new(self.timer.progress, canvas.surface()));

        let middle = self.rows / 2;
        canvas.stamp(middle, &time_string(self.timer.remaining_millis()));
        if self.timer.state == TimerState::Complete {
            canvas.stamp(middle + 1, TIME_UP);
        }

        let ring = canvas.render(&self.palette, self.pulse.alpha());
        format!(
            "{}\n\n{}\n{}",
            ring,
            self.buttons_view(),
            self.help.view(&self.keymap)
        )
    }

    fn buttons_view(&self) -> String {
        let accent = lipgloss::Color::from(self.palette.accent.as_str());
        let primary = Style::new()
            .foreground(accent.clone())
            .bold(true)
            .render(&format!("[ {} ]", self.timer.primary_icon().glyph()));
        let reset = Style::new().foreground(accent).render("Reset");

        let row = format!("{}   {}", primary, reset);
        let pad = self.cols.saturating_sub(lipgloss::width_visible(&row)) / 2;
        format!("{}{}", " ".repeat(pad), row)
    }
}

fn combine(mut cmds: Vec<Cmd>) -> Option<Cmd> {
    match cmds.len() {
        0 => None,
        1 => cmds.pop(),
        _ => Some(bubbletea_rs::batch(cmds)),
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::default(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::SHORT_DURATION;
    use std::time::Instant;

    fn short() -> Model {
        new(&[with_duration(SHORT_DURATION)])
    }

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn plain(s: &str) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    fn reset_done(m: &Model) -> Msg {
        Box::new(ResetDoneMsg {
            id: m.id(),
            tag: m.reset_tag,
        })
    }

    #[test]
    fn test_defaults() {
        let m = Model::default();
        assert_eq!(m.timer().duration_millis, 30_000);
        assert_eq!(m.timer().state, TimerState::Idle);
        assert_eq!(m.size(), (DEFAULT_COLS, DEFAULT_ROWS));
        assert!(plain(&m.view()).contains("00:30"));
    }

    #[test]
    fn test_press_cycle_drives_tween() {
        let mut m = short();

        assert!(m.press().is_some());
        assert_eq!(m.timer().state, TimerState::Running);
        assert!(m.tween.is_animating());
        assert_eq!(m.tween.duration(), Some(Duration::from_millis(5_000)));

        let _ = m.apply_progress(0.4);
        let _ = m.press();
        assert_eq!(m.timer().state, TimerState::Paused);
        assert!(!m.tween.is_animating());
        assert_eq!(m.tween.value(), 0.4);
        assert!(m.pulse.running());

        // Resuming animates the rest at the same pace
        let _ = m.press();
        assert_eq!(m.timer().state, TimerState::Running);
        assert_eq!(m.tween.duration(), Some(Duration::from_millis(3_000)));
        assert!(!m.pulse.running());
    }

    #[test]
    fn test_completion_scenario() {
        let mut m = short();
        let _ = m.press();
        let _ = m.apply_progress(1.0);

        let timer = m.timer();
        assert_eq!(timer.state, TimerState::Complete);
        assert_eq!(timer.progress, 1.0);
        assert!(m.pulse.running());

        let view = plain(&m.view());
        assert!(view.contains("00:00"));
        assert!(view.contains(TIME_UP));
        assert!(view.contains("restart"));
    }

    #[test]
    fn test_restart_after_completion() {
        let mut m = short();
        let _ = m.press();
        let _ = m.apply_progress(1.0);

        assert!(m.press().is_some());
        assert_eq!(m.timer().state, TimerState::Running);
        assert_eq!(m.timer().progress, 0.0);
        assert_eq!(m.tween.value(), 0.0);
        assert_eq!(m.tween.duration(), Some(Duration::from_millis(5_000)));
        assert!(!plain(&m.view()).contains(TIME_UP));
    }

    #[test]
    fn test_without_completion_never_completes() {
        let mut m = new(&[with_duration(SHORT_DURATION), without_completion()]);
        let _ = m.press();
        let _ = m.apply_progress(1.0);

        assert_eq!(m.timer().state, TimerState::Running);
        assert_eq!(m.timer().progress, 1.0);
        assert!(!m.tween.is_animating());
        assert!(!plain(&m.view()).contains(TIME_UP));
    }

    #[test]
    fn test_reset_two_phases() {
        let mut m = short();
        let _ = m.press();
        let _ = m.apply_progress(0.5);
        let _ = m.press();
        assert_eq!(m.timer().state, TimerState::Paused);

        let _cmd = m.reset();
        assert_eq!(m.timer().progress, 0.0);
        assert!(m.timer().resetting);
        assert_eq!(m.timer().state, TimerState::Paused);
        assert!(plain(&m.view()).contains("00:05"));

        let _ = m.update(reset_done(&m));
        assert!(!m.timer().resetting);
        assert_eq!(m.timer().state, TimerState::Idle);
        assert!(!m.pulse.running());
    }

    #[test]
    fn test_reset_while_running_restarts_after_delay() {
        let mut m = short();
        let _ = m.press();
        let _ = m.apply_progress(0.3);

        let _cmd = m.reset();
        assert!(!m.tween.is_animating());
        assert_eq!(m.tween.value(), 0.0);
        assert_eq!(m.timer().state, TimerState::Running);

        assert!(m.update(reset_done(&m)).is_some());
        assert!(!m.timer().resetting);
        assert_eq!(m.timer().state, TimerState::Running);
        assert_eq!(m.tween.duration(), Some(Duration::from_millis(5_000)));
    }

    #[test]
    fn test_double_reset_matches_single() {
        let mut once = short();
        let _ = once.press();
        let _ = once.press();
        let _cmd = once.reset();
        let _ = once.update(reset_done(&once));

        let mut twice = short();
        let _ = twice.press();
        let _ = twice.press();
        let paused = twice.timer();
        let _first = twice.reset();
        let stale = reset_done(&twice);
        let _second = twice.reset();
        assert_eq!(twice.timer(), paused.begin_reset());

        // The first reset's delayed message is superseded by the second
        assert!(twice.update(stale).is_none());
        assert!(twice.timer().resetting);

        let _ = twice.update(reset_done(&twice));
        assert_eq!(twice.timer(), once.timer());
    }

    #[test]
    fn test_foreign_reset_message_ignored() {
        let mut m = short();
        let _cmd = m.reset();
        let foreign = Box::new(ResetDoneMsg {
            id: m.id() + 999,
            tag: m.reset_tag,
        });
        assert!(m.update(foreign).is_none());
        assert!(m.timer().resetting);
    }

    #[test]
    fn test_keys() {
        let mut m = short();
        assert!(m.update(key(KeyCode::Char(' '))).is_some());
        assert_eq!(m.timer().state, TimerState::Running);
        assert_eq!(m.keymap.primary.help().desc, "pause");

        let _ = m.update(key(KeyCode::Enter));
        assert_eq!(m.timer().state, TimerState::Paused);
        assert_eq!(m.keymap.primary.help().desc, "start");

        assert!(m.update(key(KeyCode::Char('r'))).is_some());
        assert!(m.timer().resetting);

        assert!(m.update(key(KeyCode::Char('x'))).is_none());
        assert!(m.update(key(KeyCode::Char('q'))).is_some());
    }

    #[test]
    fn test_window_resize() {
        let mut m = short();
        let _ = m.update(Box::new(WindowSizeMsg {
            width: 60,
            height: 24,
        }));
        assert_eq!(m.size(), (60, 21));
        assert_eq!(m.help.width, 60);

        m.set_size(2, 2);
        assert_eq!(m.size(), (MIN_COLS, MIN_ROWS));
    }

    #[test]
    fn test_view_layout() {
        let m = new(&[with_duration(SHORT_DURATION), with_size(21, 10)]);
        let view = plain(&m.view());
        let lines: Vec<&str> = view.lines().collect();

        // Ring rows, blank line, buttons, help
        assert_eq!(lines.len(), 10 + 3);
        assert!(lines[5].contains("00:05"));
        assert!(lines[11].contains("Reset"));
        assert!(lines[11].contains('▶'));
        assert!(lines[12].contains("space start"));
    }

    #[tokio::test]
    async fn test_frames_drive_progress_to_completion() {
        let mut m = new(&[with_duration(Duration::from_millis(200))]);
        let mut next = m.press();
        let mut last = m.timer().progress;
        let mut frames = 0;

        while m.timer().state == TimerState::Running {
            let cmd = next.take().expect("running timer schedules a frame");
            let msg = cmd.await.expect("frame tick produces a message");
            next = m.update(msg);

            assert!(m.timer().progress >= last, "progress went backwards");
            last = m.timer().progress;
            frames += 1;
            assert!(frames < 1_000, "countdown never finished");
        }

        assert!(frames > 1);
        assert_eq!(m.timer().state, TimerState::Complete);
        assert_eq!(m.timer().progress, 1.0);
        assert!(!m.tween.is_animating());
        assert!(m.pulse.running());
    }

    #[tokio::test]
    async fn test_frame_from_before_pause_is_dropped() {
        let mut m = new(&[with_duration(Duration::from_millis(200))]);
        let before_pause = m.press().expect("start schedules a frame");
        let _ = m.press();
        let _resumed = m.press();
        assert_eq!(m.timer().state, TimerState::Running);

        let stale = before_pause.await.expect("frame tick produces a message");
        let timer = m.timer();
        assert!(m.update(stale).is_none());
        assert_eq!(m.timer(), timer);
        assert!(m.tween.is_animating());
    }

    #[tokio::test]
    async fn test_reset_delay_elapses() {
        let mut m = short();
        let _ = m.press();
        let _ = m.press();

        let started = Instant::now();
        let cmd = m.reset();
        let msg = cmd.await.expect("reset delay produces a message");
        assert!(started.elapsed() >= RESET_DELAY);

        let _ = m.update(msg);
        assert!(!m.timer().resetting);
        assert_eq!(m.timer().state, TimerState::Idle);
    }
}
