//! Key bindings for the timer screen.
//!
//! A [`Binding`] groups the key presses that trigger one action together with
//! the text shown for it in the help line.
//!
//! ```rust
//! use ring_timer::key::Binding;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let reset = Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset");
//! let quit = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
//!     .with_help("ctrl+c", "quit");
//!
//! assert!(reset.enabled());
//! assert_eq!(quit.help().desc, "quit");
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub mods: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

/// Help text for a binding: the key label and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key label, e.g. `"space"`.
    pub key: String,
    /// Description, e.g. `"pause"`.
    pub desc: String,
}

/// Keys bound to one action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates an enabled binding for `keys` with empty help text.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.set_help(key, desc);
        self
    }

    /// Replaces the help text in place.
    pub fn set_help(&mut self, key: impl Into<String>, desc: impl Into<String>) {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the binding is active.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Help text for the binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Bound key presses.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Reports whether `msg` triggers this binding.
    ///
    /// Plain character bindings also match when the terminal reports SHIFT,
    /// since upper-case letters arrive that way.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }

        self.keys.iter().any(|k| {
            k.code == msg.key
                && (k.mods == msg.modifiers
                    || (k.mods.is_empty()
                        && msg.modifiers == KeyModifiers::SHIFT
                        && matches!(k.code, KeyCode::Char(_))))
        })
    }
}
