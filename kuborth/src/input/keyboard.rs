//! Keyboard input helpers and crate-local key types, decoupled from
//! `crossterm` so the router and its tests don't depend on terminal
//! internals.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers { ctrl: false, alt: false, shift: false };

    pub fn ctrl() -> Self {
        KeyModifiers { ctrl: true, ..Self::NONE }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl From<crossterm::event::KeyModifiers> for KeyModifiers {
    fn from(m: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers as CtMods;
        KeyModifiers {
            ctrl: m.contains(CtMods::CONTROL),
            alt: m.contains(CtMods::ALT),
            shift: m.contains(CtMods::SHIFT),
        }
    }
}

/// Lightweight key code abstraction mirroring the common
/// `crossterm::event::KeyCode` variants used by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Insert,
    F(u8),
    Null,
    Other,
}

impl From<crossterm::event::KeyCode> for KeyCode {
    fn from(k: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode as CtKC;
        match k {
            CtKC::Char(c) => KeyCode::Char(c),
            CtKC::Enter => KeyCode::Enter,
            CtKC::Esc => KeyCode::Esc,
            CtKC::Backspace => KeyCode::Backspace,
            CtKC::Tab => KeyCode::Tab,
            CtKC::Left => KeyCode::Left,
            CtKC::Right => KeyCode::Right,
            CtKC::Up => KeyCode::Up,
            CtKC::Down => KeyCode::Down,
            CtKC::Home => KeyCode::Home,
            CtKC::End => KeyCode::End,
            CtKC::PageUp => KeyCode::PageUp,
            CtKC::PageDown => KeyCode::PageDown,
            CtKC::Delete => KeyCode::Delete,
            CtKC::Insert => KeyCode::Insert,
            CtKC::F(n) => KeyCode::F(n),
            CtKC::Null => KeyCode::Null,
            _ => KeyCode::Other,
        }
    }
}

/// A key press with its modifiers, the unit the router matches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub fn plain(code: KeyCode) -> Self {
        Key { code, modifiers: KeyModifiers::NONE }
    }

    pub fn ctrl(c: char) -> Self {
        Key { code: KeyCode::Char(c), modifiers: KeyModifiers::ctrl() }
    }

    pub fn is_ctrl_char(&self, c: char) -> bool {
        self.modifiers.ctrl && matches!(&self.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

impl From<crossterm::event::KeyEvent> for Key {
    fn from(ev: crossterm::event::KeyEvent) -> Self {
        Key { code: ev.code.into(), modifiers: ev.modifiers.into() }
    }
}

pub fn is_printable_key(k: &KeyCode) -> bool {
    matches!(k, KeyCode::Char(_))
}
