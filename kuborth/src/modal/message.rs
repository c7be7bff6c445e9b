//! Informational and error dialogs: single body of text, dismissed by any
//! key that isn't part of an Esc sequence.

use crate::input::Key;
use crate::modal::{Modal, ModalGeometry, ModalOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

pub struct MessageDialog {
    title: String,
    body: String,
    kind: MessageKind,
}

impl MessageDialog {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        MessageDialog { title: title.into(), body: body.into(), kind: MessageKind::Info }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        MessageDialog { title: title.into(), body: body.into(), kind: MessageKind::Error }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }
}

impl Modal for MessageDialog {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> &str {
        match self.kind {
            MessageKind::Info => "message",
            MessageKind::Error => "error",
        }
    }

    fn geometry(&self) -> ModalGeometry {
        ModalGeometry::Windowed { win_w: 60, win_h: 8, offset: (0, 0) }
    }

    fn handle_key(&mut self, _key: &Key) -> ModalOutcome {
        ModalOutcome::Close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    #[test]
    fn any_key_dismisses() {
        let mut dlg = MessageDialog::error("Delete failed", "namespace is not empty");
        assert_eq!(dlg.kind(), MessageKind::Error);
        assert_eq!(dlg.handle_key(&Key::plain(KeyCode::Char('z'))), ModalOutcome::Close);
    }
}
