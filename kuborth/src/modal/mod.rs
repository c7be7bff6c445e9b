//! The modal stack (§4.5): a LIFO of modals where only the top receives
//! key events, plus the Esc-sequence disambiguator shared by the stack
//! and the top-level router (§4.4 "Esc sequence").

pub mod confirm;
pub mod create_namespace;
pub mod message;
pub mod theme_selector;
pub mod view_options;

use std::time::{Duration, Instant};

use crate::input::Key;

/// Where a modal is drawn. `Windowed` anchors over a specific panel (used
/// by mode-selector popups) with a cached background snapshot taken once,
/// at open time, to avoid flicker while the modal is up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalGeometry {
    FullScreen,
    Windowed { win_w: u16, win_h: u16, offset: (i16, i16) },
}

/// What a modal's key handler asks the stack to do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalOutcome {
    /// Consume the key, keep the modal open.
    Continue,
    /// Close this modal.
    Close,
    /// Close this modal and open the theme selector in its place (`Esc 9`).
    RequestTheme,
}

/// A single entry in the modal stack.
pub trait Modal: Send + 'static {
    fn name(&self) -> &str;

    /// Downcast hook so the router can read a concrete dialog's decision
    /// (e.g. `ConfirmDialog::take_decision`) after the stack reports it
    /// closed, without the stack itself knowing about dialog-specific state.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;

    /// Read-only counterpart of `as_any_mut`, for the renderer to read a
    /// concrete dialog's fields without needing mutable access to the stack.
    fn as_any(&self) -> &dyn std::any::Any;

    fn geometry(&self) -> ModalGeometry;

    /// Whether a lone Esc (with no follow-up) should close this modal once
    /// its 1-second window expires.
    fn close_on_single_esc(&self) -> bool {
        true
    }

    /// Whether `Esc 9` should open the theme selector over this modal.
    fn supports_request_theme(&self) -> bool {
        false
    }

    fn handle_key(&mut self, key: &Key) -> ModalOutcome;

    /// Called once, when this modal is popped, so state such as a
    /// reverted theme preview can be applied to whatever is now on top.
    fn on_close(&mut self) {}
}

const ESC_WINDOW: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EscState {
    Idle,
    Armed,
}

/// Tracks the "lone Esc arms a 1-second window, a digit or second Esc
/// within it disambiguates" state machine shared by the modal stack and
/// the top-level router.
#[derive(Debug)]
pub struct EscSequencer {
    state: EscState,
    deadline: Option<Instant>,
}

impl Default for EscSequencer {
    fn default() -> Self {
        EscSequencer { state: EscState::Idle, deadline: None }
    }
}

/// Outcome of feeding a key into the Esc sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscFeed {
    /// The key was not part of an Esc sequence; handle normally.
    Unrelated,
    /// A lone Esc armed the window; consume the key.
    Armed,
    /// A second Esc arrived within the window: always closes.
    DoubleEsc,
    /// A digit arrived within the window, mapped to a function key index
    /// (1..=9 -> 1..=9, 0 -> 10).
    Digit(u8),
}

impl EscSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.state == EscState::Armed
    }

    /// Feed a key at time `now`. Expired windows are treated as idle
    /// before the key is considered.
    pub fn feed(&mut self, key: &Key, now: Instant) -> EscFeed {
        self.expire(now);

        use crate::input::KeyCode;
        match (&self.state, &key.code) {
            (EscState::Idle, KeyCode::Esc) => {
                self.state = EscState::Armed;
                self.deadline = Some(now + ESC_WINDOW);
                EscFeed::Armed
            }
            (EscState::Armed, KeyCode::Esc) => {
                self.reset();
                EscFeed::DoubleEsc
            }
            (EscState::Armed, KeyCode::Char(c)) if c.is_ascii_digit() => {
                self.reset();
                let d = c.to_digit(10).unwrap() as u8;
                EscFeed::Digit(if d == 0 { 10 } else { d })
            }
            (EscState::Armed, _) => {
                // Any other key while armed cancels the sequence without
                // consuming the key as part of it.
                self.reset();
                EscFeed::Unrelated
            }
            (EscState::Idle, _) => EscFeed::Unrelated,
        }
    }

    /// Poll for timer expiry without feeding a key (called from the tick
    /// message). Returns true if the window just expired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let was_armed = self.is_armed();
        self.expire(now);
        was_armed && !self.is_armed()
    }

    fn expire(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.reset();
            }
        }
    }

    fn reset(&mut self) {
        self.state = EscState::Idle;
        self.deadline = None;
    }
}

/// LIFO stack of modals. Only `top()`/`top_mut()` ever see key events;
/// everything beneath is frozen until the top closes.
#[derive(Default)]
pub struct ModalStack {
    stack: Vec<Box<dyn Modal>>,
    esc: EscSequencer,
    last_closed: Option<Box<dyn Modal>>,
}

impl ModalStack {
    pub fn new() -> Self {
        ModalStack { stack: Vec::new(), esc: EscSequencer::new(), last_closed: None }
    }

    pub fn push(&mut self, modal: Box<dyn Modal>) {
        self.stack.push(modal);
        self.esc.reset();
    }

    pub fn top(&self) -> Option<&dyn Modal> {
        self.stack.last().map(|m| m.as_ref())
    }

    pub fn top_mut(&mut self) -> Option<&mut Box<dyn Modal>> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Pop the top modal, running its `on_close` hook first. The popped
    /// modal is retained for [`Self::take_closed`] so a caller that only
    /// sees `ModalHandled::Closed` from `handle_key` can still read it.
    pub fn pop(&mut self) -> Option<Box<dyn Modal>> {
        let mut modal = self.stack.pop()?;
        modal.on_close();
        self.esc.reset();
        Some(modal)
    }

    /// Pop the top modal the way `handle_key` does, stashing it in
    /// `last_closed` instead of returning it.
    fn close_top(&mut self) {
        if let Some(mut modal) = self.stack.pop() {
            modal.on_close();
            self.esc.reset();
            self.last_closed = Some(modal);
        }
    }

    /// Take the modal most recently popped by `handle_key`, so the router
    /// can downcast it (via `Modal::as_any_mut`) and read its decision.
    pub fn take_closed(&mut self) -> Option<Box<dyn Modal>> {
        self.last_closed.take()
    }

    /// Route a key event to the top modal, applying the Esc-sequence
    /// semantics of §4.5 before handing anything else to the modal's own
    /// `handle_key`.
    pub fn handle_key(&mut self, key: &Key, now: Instant) -> ModalHandled {
        if self.stack.is_empty() {
            return ModalHandled::NoModal;
        }

        match self.esc.feed(key, now) {
            EscFeed::Armed => return ModalHandled::Consumed,
            EscFeed::DoubleEsc => {
                self.close_top();
                return ModalHandled::Closed;
            }
            EscFeed::Digit(10) => {
                self.close_top();
                return ModalHandled::Closed;
            }
            EscFeed::Digit(9) => {
                let supports = self.top().map(|m| m.supports_request_theme()).unwrap_or(false);
                if supports {
                    return ModalHandled::RequestTheme;
                }
                return ModalHandled::Consumed;
            }
            EscFeed::Digit(_) => return ModalHandled::Consumed,
            EscFeed::Unrelated => {}
        }

        let outcome = match self.top_mut() {
            Some(modal) => modal.handle_key(key),
            None => return ModalHandled::NoModal,
        };

        match outcome {
            ModalOutcome::Continue => ModalHandled::Consumed,
            ModalOutcome::Close => {
                self.close_top();
                ModalHandled::Closed
            }
            ModalOutcome::RequestTheme => ModalHandled::RequestTheme,
        }
    }

    /// Called from the folder-tick / frame tick; closes the top modal if
    /// its lone-Esc window just expired and it opts into that behavior.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.esc.tick(now) {
            let closes = self.top().map(|m| m.close_on_single_esc()).unwrap_or(false);
            if closes {
                self.close_top();
                return true;
            }
        }
        false
    }
}

/// Result of routing a key through the modal stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalHandled {
    /// No modal is open; the router should try other handlers.
    NoModal,
    /// A modal consumed the key and remains open.
    Consumed,
    /// The top modal closed as a result of this key.
    Closed,
    /// `Esc 9` requested the theme selector.
    RequestTheme,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    struct Stub {
        closes: bool,
        supports_theme: bool,
        closed: std::sync::Arc<std::sync::atomic::AtomicBool>,
    }

    impl Modal for Stub {
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn name(&self) -> &str {
            "stub"
        }
        fn geometry(&self) -> ModalGeometry {
            ModalGeometry::FullScreen
        }
        fn close_on_single_esc(&self) -> bool {
            self.closes
        }
        fn supports_request_theme(&self) -> bool {
            self.supports_theme
        }
        fn handle_key(&mut self, key: &Key) -> ModalOutcome {
            if key.code == KeyCode::Char('q') {
                ModalOutcome::Close
            } else {
                ModalOutcome::Continue
            }
        }
        fn on_close(&mut self) {
            self.closed.store(true, std::sync::atomic::Ordering::SeqCst);
        }
    }

    fn stub(closes: bool, supports_theme: bool) -> (Box<dyn Modal>, std::sync::Arc<std::sync::atomic::AtomicBool>) {
        let closed = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        (Box::new(Stub { closes, supports_theme, closed: closed.clone() }), closed)
    }

    #[test]
    fn empty_stack_reports_no_modal() {
        let mut stack = ModalStack::new();
        let now = Instant::now();
        assert_eq!(stack.handle_key(&Key::plain(KeyCode::Char('x')), now), ModalHandled::NoModal);
    }

    #[test]
    fn double_esc_always_closes() {
        let mut stack = ModalStack::new();
        let (modal, closed) = stub(false, false);
        stack.push(modal);
        let now = Instant::now();
        assert_eq!(stack.handle_key(&Key::plain(KeyCode::Esc), now), ModalHandled::Consumed);
        assert_eq!(stack.handle_key(&Key::plain(KeyCode::Esc), now), ModalHandled::Closed);
        assert!(closed.load(std::sync::atomic::Ordering::SeqCst));
        assert!(stack.is_empty());
    }

    #[test]
    fn esc_zero_closes_top() {
        let mut stack = ModalStack::new();
        let (modal, _) = stub(false, false);
        stack.push(modal);
        let now = Instant::now();
        stack.handle_key(&Key::plain(KeyCode::Esc), now);
        assert_eq!(stack.handle_key(&Key::plain(KeyCode::Char('0')), now), ModalHandled::Closed);
    }

    #[test]
    fn esc_nine_requests_theme_only_when_supported() {
        let mut stack = ModalStack::new();
        let (modal, _) = stub(false, true);
        stack.push(modal);
        let now = Instant::now();
        stack.handle_key(&Key::plain(KeyCode::Esc), now);
        assert_eq!(stack.handle_key(&Key::plain(KeyCode::Char('9')), now), ModalHandled::RequestTheme);
    }

    #[test]
    fn esc_nine_is_consumed_when_unsupported() {
        let mut stack = ModalStack::new();
        let (modal, _) = stub(false, false);
        stack.push(modal);
        let now = Instant::now();
        stack.handle_key(&Key::plain(KeyCode::Esc), now);
        assert_eq!(stack.handle_key(&Key::plain(KeyCode::Char('9')), now), ModalHandled::Consumed);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn lone_esc_expiry_closes_when_opted_in() {
        let mut stack = ModalStack::new();
        let (modal, _) = stub(true, false);
        stack.push(modal);
        let now = Instant::now();
        stack.handle_key(&Key::plain(KeyCode::Esc), now);
        assert!(!stack.tick(now));
        assert!(stack.tick(now + ESC_WINDOW + Duration::from_millis(1)));
        assert!(stack.is_empty());
    }

    #[test]
    fn lone_esc_expiry_leaves_modal_open_when_opted_out() {
        let mut stack = ModalStack::new();
        let (modal, _) = stub(false, false);
        stack.push(modal);
        let now = Instant::now();
        stack.handle_key(&Key::plain(KeyCode::Esc), now);
        assert!(!stack.tick(now + ESC_WINDOW + Duration::from_millis(1)));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn closing_top_modal_does_not_touch_one_beneath() {
        let mut stack = ModalStack::new();
        let (bottom, bottom_closed) = stub(false, false);
        let (top, top_closed) = stub(false, false);
        stack.push(bottom);
        stack.push(top);
        let now = Instant::now();
        assert_eq!(stack.handle_key(&Key::plain(KeyCode::Char('q')), now), ModalHandled::Closed);
        assert!(top_closed.load(std::sync::atomic::Ordering::SeqCst));
        assert!(!bottom_closed.load(std::sync::atomic::Ordering::SeqCst));
        assert_eq!(stack.depth(), 1);
    }
}
