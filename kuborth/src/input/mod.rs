//! Input helpers and unified input types.
//!
//! Provides a small abstraction layer over terminal input events
//! (keyboard, mouse, and resize) so the rest of the app does not depend
//! directly on `crossterm` internals. The event loop is single-threaded
//! and cooperative: `poll`/`read_event` are called from the same loop
//! that renders, so no async producer or cross-thread channel is needed.
//!
//! Examples
//!
//! ```ignore
//! use std::time::Duration;
//! if crate::input::poll(Duration::from_millis(100))? {
//!     match crate::input::read_event()? {
//!         crate::input::InputEvent::Key(k) => { /* handle keyboard */ }
//!         crate::input::InputEvent::Mouse(m) => { /* handle mouse */ }
//!         crate::input::InputEvent::Resize(w,h) => { /* handle resize */ }
//!         _ => {}
//!     }
//! }
//! ```
pub mod keyboard;
pub mod mouse;

// Re-export a small, stable public surface for input types. Avoid a
// blanket `pub use *` so downstream modules only rely on the necessary
// symbols and refactors remain smaller.
pub use keyboard::{is_printable_key, Key, KeyCode, KeyModifiers};
pub use mouse::{is_left_down, MouseButton, MouseEvent, MouseEventKind};

use std::time::Duration;

use thiserror::Error;

/// Map a `crossterm::event::Event` into the crate-local `InputEvent`.
fn map_crossterm_event(ev: crossterm::event::Event) -> InputEvent {
    match ev {
        crossterm::event::Event::Key(k) => InputEvent::Key(k.into()),
        crossterm::event::Event::Mouse(m) => InputEvent::Mouse(m.into()),
        crossterm::event::Event::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::Other,
    }
}

/// Unified, cross-platform input event for the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Keyboard key event, modifiers and all (crate-local `Key`).
    Key(Key),
    /// Mouse event (crate-local `MouseEvent`).
    Mouse(MouseEvent),
    /// Terminal resize: (width, height).
    Resize(u16, u16),
    /// Any other event (focus changes, unsupported kinds, ...).
    Other,
}

/// Typed input errors for the `input` module.
#[derive(Debug, Error)]
pub enum InputError {
    /// Error returned when `crossterm::event::read()` fails. The inner
    /// string contains a formatted representation of the original error.
    #[error("crossterm error: {0}")]
    Crossterm(String),

    /// Wrapper for low-level IO errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read the next input event but return a typed `InputError` on failure.
pub fn read_event_typed() -> Result<InputEvent, InputError> {
    crossterm::event::read()
        .map_err(|e| InputError::Crossterm(format!("{e:?}")))
        .map(map_crossterm_event)
}

/// Poll for an input event with a timeout. Delegates to `crossterm::event::poll`.
pub fn poll(timeout: Duration) -> anyhow::Result<bool> {
    Ok(crossterm::event::poll(timeout)?)
}

/// Read the next input event and map it to `InputEvent`.
pub fn read_event() -> anyhow::Result<InputEvent> {
    read_event_typed().map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_display() {
        let err = InputError::Crossterm("broken".into());
        let s = format!("{}", err);
        assert!(s.contains("crossterm error"));
    }
}
