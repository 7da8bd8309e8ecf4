//! Keyboard input types for text fields, plus the winit adapter.
//!
//! Fields receive characters (printable characters, `DELETE`/`BACKSPACE` and
//! `RETURN`) through `key_down`/`key_up`, and arrow keys through
//! `special_key_down`/`special_key_up`.

use winit::keyboard::{Key, ModifiersState, NamedKey};

/// Delete-backward as reported by most platforms
pub const DELETE: char = '\u{7f}';
/// Delete-backward as reported by the rest
pub const BACKSPACE: char = '\u{8}';
/// Submit
pub const RETURN: char = '\r';

/// Modifier keys as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= Self::CTRL.0;
        }
        if shift {
            bits |= Self::SHIFT.0;
        }
        if alt {
            bits |= Self::ALT.0;
        }
        if meta {
            bits |= Self::META.0;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & Self::META.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The platform "command" modifier (Cmd on macOS, Ctrl elsewhere)
    pub fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::META
        } else {
            Modifiers::CTRL
        }
    }

    /// Check if the platform command modifier is held.
    ///
    /// Letters typed while it is held are shortcuts, not text.
    pub fn command(self) -> bool {
        self.0 & Self::cmd().0 != 0
    }

    pub fn from_winit(state: ModifiersState) -> Self {
        Self::new(
            state.control_key(),
            state.shift_key(),
            state.alt_key(),
            state.super_key(),
        )
    }
}

/// Non-character keys a text field reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Left,
    Right,
}

/// A key event in the form text fields consume it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKey {
    /// Printable character, `DELETE` or `RETURN`
    Char(char),
    Special(SpecialKey),
    /// Focus traversal, handled by the page
    Tab,
    /// Handled by the page
    Escape,
}

/// Convert a winit logical key to a field key.
///
/// Returns None for keys no field cares about.
pub fn field_key_from_winit(logical_key: &Key) -> Option<FieldKey> {
    match logical_key {
        Key::Named(named) => match named {
            NamedKey::Backspace => Some(FieldKey::Char(DELETE)),
            NamedKey::Enter => Some(FieldKey::Char(RETURN)),
            NamedKey::Space => Some(FieldKey::Char(' ')),
            NamedKey::ArrowLeft => Some(FieldKey::Special(SpecialKey::Left)),
            NamedKey::ArrowRight => Some(FieldKey::Special(SpecialKey::Right)),
            NamedKey::Tab => Some(FieldKey::Tab),
            NamedKey::Escape => Some(FieldKey::Escape),
            _ => None,
        },
        Key::Character(s) => {
            let mut chars = s.chars();
            let c = chars.next()?;
            // Composed sequences are not single keys
            if chars.next().is_some() {
                return None;
            }
            Some(FieldKey::Char(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::SmolStr;

    #[test]
    fn test_modifiers_flags() {
        let mods = Modifiers::new(true, false, true, false);
        assert!(mods.ctrl());
        assert!(!mods.shift());
        assert!(mods.alt());
        assert!(!mods.meta());
        assert!(!mods.is_empty());
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn test_command_follows_platform() {
        assert!(Modifiers::cmd().command());
        assert!(!Modifiers::SHIFT.command());
        assert!(!Modifiers::NONE.command());
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            field_key_from_winit(&Key::Named(NamedKey::Backspace)),
            Some(FieldKey::Char(DELETE))
        );
        assert_eq!(
            field_key_from_winit(&Key::Named(NamedKey::Enter)),
            Some(FieldKey::Char(RETURN))
        );
        assert_eq!(
            field_key_from_winit(&Key::Named(NamedKey::ArrowLeft)),
            Some(FieldKey::Special(SpecialKey::Left))
        );
        assert_eq!(field_key_from_winit(&Key::Named(NamedKey::F1)), None);
    }

    #[test]
    fn test_character_keys_keep_case() {
        assert_eq!(
            field_key_from_winit(&Key::Character(SmolStr::new("A"))),
            Some(FieldKey::Char('A'))
        );
        assert_eq!(
            field_key_from_winit(&Key::Character(SmolStr::new("ab"))),
            None
        );
    }
}
