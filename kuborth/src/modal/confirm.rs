//! Confirm/cancel dialog used for destructive actions (F8 Delete).

use crate::input::{Key, KeyCode};
use crate::modal::{Modal, ModalGeometry, ModalOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmChoice {
    Yes,
    No,
}

pub struct ConfirmDialog {
    prompt: String,
    selected: ConfirmChoice,
    decision: Option<bool>,
}

impl ConfirmDialog {
    pub fn new(prompt: impl Into<String>) -> Self {
        ConfirmDialog { prompt: prompt.into(), selected: ConfirmChoice::No, decision: None }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn selected(&self) -> ConfirmChoice {
        self.selected
    }

    /// Takes the decision: `Some(true)` confirmed, `Some(false)` or `None`
    /// (closed without an explicit choice) means cancel.
    pub fn take_decision(&mut self) -> Option<bool> {
        self.decision.take()
    }
}

impl Modal for ConfirmDialog {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> &str {
        "confirm"
    }

    fn geometry(&self) -> ModalGeometry {
        ModalGeometry::Windowed { win_w: 50, win_h: 7, offset: (0, 0) }
    }

    fn handle_key(&mut self, key: &Key) -> ModalOutcome {
        match &key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected = match self.selected {
                    ConfirmChoice::Yes => ConfirmChoice::No,
                    ConfirmChoice::No => ConfirmChoice::Yes,
                };
                ModalOutcome::Continue
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.decision = Some(true);
                ModalOutcome::Close
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.decision = Some(false);
                ModalOutcome::Close
            }
            KeyCode::Enter => {
                self.decision = Some(self.selected == ConfirmChoice::Yes);
                ModalOutcome::Close
            }
            _ => ModalOutcome::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_is_no() {
        let dlg = ConfirmDialog::new("Delete pod foo?");
        assert_eq!(dlg.selected(), ConfirmChoice::No);
    }

    #[test]
    fn enter_on_default_selection_cancels() {
        let mut dlg = ConfirmDialog::new("Delete pod foo?");
        assert_eq!(dlg.handle_key(&Key::plain(KeyCode::Enter)), ModalOutcome::Close);
        assert_eq!(dlg.take_decision(), Some(false));
    }

    #[test]
    fn toggling_then_enter_confirms() {
        let mut dlg = ConfirmDialog::new("Delete pod foo?");
        dlg.handle_key(&Key::plain(KeyCode::Left));
        assert_eq!(dlg.handle_key(&Key::plain(KeyCode::Enter)), ModalOutcome::Close);
        assert_eq!(dlg.take_decision(), Some(true));
    }

    #[test]
    fn y_shortcut_confirms_immediately() {
        let mut dlg = ConfirmDialog::new("Delete pod foo?");
        assert_eq!(dlg.handle_key(&Key::plain(KeyCode::Char('y'))), ModalOutcome::Close);
        assert_eq!(dlg.take_decision(), Some(true));
    }
}
