//! Keys, modifiers, and the input field's key bindings

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::editable::{MoveTarget, TextEditMsg};

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ModifierFlags", into = "ModifierFlags")]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if the platform command key is held (Cmd on macOS, Ctrl elsewhere)
    pub fn has_cmd(self) -> bool {
        if cfg!(target_os = "macos") {
            self.meta()
        } else {
            self.ctrl()
        }
    }

    /// Modifier that turns a drag-move into a drag-copy (Option on macOS, Ctrl elsewhere)
    pub fn is_copy_drag(self) -> bool {
        if cfg!(target_os = "macos") {
            self.alt()
        } else {
            self.ctrl()
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Serialized form of [`Modifiers`] used in replay scripts
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ModifierFlags {
    ctrl: bool,
    shift: bool,
    alt: bool,
    meta: bool,
}

impl From<ModifierFlags> for Modifiers {
    fn from(flags: ModifierFlags) -> Self {
        Modifiers::new(flags.ctrl, flags.shift, flags.alt, flags.meta)
    }
}

impl From<Modifiers> for ModifierFlags {
    fn from(mods: Modifiers) -> Self {
        ModifierFlags {
            ctrl: mods.ctrl(),
            shift: mods.shift(),
            alt: mods.alt(),
            meta: mods.meta(),
        }
    }
}

/// Keys the input field reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// A character key (already shifted/composed by the platform)
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Enter,
}

/// Map a key press to an editing message.
///
/// Command shortcuts use the platform command modifier. Unbound combinations
/// (and characters typed with Ctrl/Cmd held) map to `None`.
pub fn key_to_msg(key: Key, mods: Modifiers) -> Option<TextEditMsg> {
    let extend = mods.shift();
    // AltGr arrives as Ctrl+Alt on Windows and types a character
    let shortcut = mods.has_cmd() && !(mods.ctrl() && mods.alt());

    let msg = match key {
        Key::Char(ch) if shortcut => match ch.to_ascii_lowercase() {
            'a' => TextEditMsg::SelectAll,
            'c' => TextEditMsg::Copy,
            'x' => TextEditMsg::Cut,
            'v' => TextEditMsg::Paste,
            'z' if extend => TextEditMsg::Redo,
            'z' => TextEditMsg::Undo,
            'y' => TextEditMsg::Redo,
            _ => return None,
        },
        Key::Char(ch) => TextEditMsg::InsertChar(ch),
        Key::Backspace => TextEditMsg::DeleteBackward,
        Key::Delete => TextEditMsg::DeleteForward,
        Key::Left => movement(MoveTarget::Left, extend),
        Key::Right => movement(MoveTarget::Right, extend),
        Key::Home => movement(MoveTarget::Start, extend),
        Key::End => movement(MoveTarget::End, extend),
        Key::Enter => TextEditMsg::Submit,
    };

    Some(msg)
}

fn movement(target: MoveTarget, extend: bool) -> TextEditMsg {
    if extend {
        TextEditMsg::MoveWithSelection(target)
    } else {
        TextEditMsg::Move(target)
    }
}
