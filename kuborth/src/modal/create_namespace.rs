//! F7 "Create Namespace" dialog: a single text field validated against the
//! DNS-1123 label rules Kubernetes applies to namespace names.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::{Key, KeyCode};
use crate::modal::{Modal, ModalGeometry, ModalOutcome};

static DNS_1123_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("static regex"));

pub fn is_valid_dns1123_label(name: &str) -> bool {
    !name.is_empty() && name.len() <= 63 && DNS_1123_LABEL.is_match(name)
}

pub struct CreateNamespaceDialog {
    typed: String,
    error: Option<String>,
    decision: Option<String>,
}

impl CreateNamespaceDialog {
    pub fn new() -> Self {
        CreateNamespaceDialog { typed: String::new(), error: None, decision: None }
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn take_decision(&mut self) -> Option<String> {
        self.decision.take()
    }
}

impl Default for CreateNamespaceDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Modal for CreateNamespaceDialog {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> &str {
        "create-namespace"
    }

    fn geometry(&self) -> ModalGeometry {
        ModalGeometry::Windowed { win_w: 50, win_h: 6, offset: (0, 0) }
    }

    fn close_on_single_esc(&self) -> bool {
        false
    }

    fn handle_key(&mut self, key: &Key) -> ModalOutcome {
        match &key.code {
            KeyCode::Char(c) if !c.is_control() => {
                self.typed.push(*c);
                self.error = None;
                ModalOutcome::Continue
            }
            KeyCode::Backspace => {
                self.typed.pop();
                self.error = None;
                ModalOutcome::Continue
            }
            KeyCode::Enter => {
                if is_valid_dns1123_label(&self.typed) {
                    self.decision = Some(std::mem::take(&mut self.typed));
                    ModalOutcome::Close
                } else {
                    self.error = Some(
                        "must be lowercase alphanumeric or '-', start/end with alphanumeric, max 63 chars"
                            .to_string(),
                    );
                    ModalOutcome::Continue
                }
            }
            _ => ModalOutcome::Continue,
        }
    }
}
