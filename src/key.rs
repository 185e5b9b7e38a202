//! Type-safe key bindings for the table and its sub-controls.
//!
//! A [`Binding`] groups one or more [`KeyPress`]es together with the help text
//! shown in the footer. Bindings can be disabled, in which case they neither
//! match input nor show up in help.
//!
//! ```rust
//! use bubbletea_datatable::key::{new_binding, with_help, with_keys_str, Binding};
//! use crossterm::event::KeyCode;
//!
//! let sort = Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort column");
//! let next = new_binding(vec![
//!     with_keys_str(&["n", "pgdown"]),
//!     with_help("n/pgdn", "next page"),
//! ]);
//!
//! assert_eq!(sort.help().desc, "sort column");
//! assert_eq!(next.keys().len(), 2);
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key combination: a key code plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub mods: KeyModifiers,
}

impl KeyPress {
    /// Returns true when the key message is this key press.
    ///
    /// Plain character bindings also accept a shifted press, since terminals
    /// report upper-case letters and symbols with `SHIFT` set.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        if self.mods == msg.modifiers {
            return true;
        }
        matches!(self.code, KeyCode::Char(_))
            && self.mods.is_empty()
            && msg.modifiers == KeyModifiers::SHIFT
    }
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

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"↑/k"`.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

/// A set of key presses that trigger the same action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from key codes or `(code, modifiers)` pairs.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text (builder pattern).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Replaces the keys with ones parsed from strings such as `"ctrl+c"`.
    ///
    /// Unknown key names are skipped.
    pub fn with_keys_str(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().filter_map(|k| parse_key(k)).collect();
        self
    }

    /// Sets the help text in place.
    pub fn set_help(&mut self, key: impl Into<String>, desc: impl Into<String>) {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the binding is active. Bindings without keys are never active.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// The key presses of this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text of this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns true when the binding is enabled and any of its keys matches.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Option setting the keys from key codes or `(code, modifiers)` pairs.
pub fn with_keys<K: Into<KeyPress>>(keys: Vec<K>) -> BindingOpt {
    let keys: Vec<KeyPress> = keys.into_iter().map(Into::into).collect();
    Box::new(move |b| b.keys = keys)
}

/// Option setting the keys from key names.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let keys: Vec<KeyPress> = keys.iter().filter_map(|k| parse_key(k)).collect();
    Box::new(move |b| b.keys = keys)
}

/// Option setting the help text.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    Box::new(move |b| b.help = help)
}

/// Option creating the binding disabled.
pub fn with_disabled() -> BindingOpt {
    Box::new(|b| b.disabled = true)
}

/// Returns true if the key message matches any of the bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Returns true if the key message matches the binding.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

/// Something that can describe its key bindings for the help view.
pub trait KeyMap {
    /// Bindings for the single-line help.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the expanded help.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Parses a key name like `"a"`, `"G"`, `"pgdown"`, `"shift+tab"` or `"ctrl+c"`.
pub fn parse_key(s: &str) -> Option<KeyPress> {
    let mut mods = KeyModifiers::NONE;
    let mut rest = s;
    // A literal "+" key must not be split as a modifier separator.
    while let Some((prefix, tail)) = rest.split_once('+') {
        if tail.is_empty() {
            break;
        }
        match prefix {
            "ctrl" => mods |= KeyModifiers::CONTROL,
            "alt" => mods |= KeyModifiers::ALT,
            "shift" => mods |= KeyModifiers::SHIFT,
            _ => return None,
        }
        rest = tail;
    }

    let code = match rest {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" => KeyCode::PageUp,
        "pgdown" => KeyCode::PageDown,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" if mods.contains(KeyModifiers::SHIFT) => {
            mods.remove(KeyModifiers::SHIFT);
            KeyCode::BackTab
        }
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(KeyPress { code, mods })
}
