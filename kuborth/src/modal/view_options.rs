//! F2 "View Options" dialog: edits the per-panel `ViewOptions` used by
//! `Folder::lines` to order and filter resource listings.

use crate::app::types::ResourceOrder;
use crate::folder::ViewOptions;
use crate::input::{Key, KeyCode};
use crate::modal::{Modal, ModalGeometry, ModalOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    ShowNonEmptyOnly,
    Order,
}

const FIELDS: [Field; 2] = [Field::ShowNonEmptyOnly, Field::Order];

pub struct ViewOptionsDialog {
    draft: ViewOptions,
    cursor: usize,
    decision: Option<ViewOptions>,
}

impl ViewOptionsDialog {
    pub fn new(current: ViewOptions) -> Self {
        ViewOptionsDialog { draft: current, cursor: 0, decision: None }
    }

    pub fn draft(&self) -> &ViewOptions {
        &self.draft
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn take_decision(&mut self) -> Option<ViewOptions> {
        self.decision.take()
    }

    fn cycle_order(&mut self, forward: bool) {
        self.draft.resource_order = match (self.draft.resource_order, forward) {
            (ResourceOrder::Favorites, true) => ResourceOrder::Alpha,
            (ResourceOrder::Alpha, true) => ResourceOrder::Group,
            (ResourceOrder::Group, true) => ResourceOrder::Favorites,
            (ResourceOrder::Favorites, false) => ResourceOrder::Group,
            (ResourceOrder::Group, false) => ResourceOrder::Alpha,
            (ResourceOrder::Alpha, false) => ResourceOrder::Favorites,
        };
    }
}

impl Modal for ViewOptionsDialog {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> &str {
        "view-options"
    }

    fn geometry(&self) -> ModalGeometry {
        ModalGeometry::Windowed { win_w: 46, win_h: 8, offset: (0, 0) }
    }

    fn handle_key(&mut self, key: &Key) -> ModalOutcome {
        match &key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(FIELDS.len() - 1);
                ModalOutcome::Continue
            }
            KeyCode::Down | KeyCode::Tab => {
                self.cursor = (self.cursor + 1) % FIELDS.len();
                ModalOutcome::Continue
            }
            KeyCode::Left => {
                match FIELDS[self.cursor] {
                    Field::ShowNonEmptyOnly => self.draft.show_non_empty_only = !self.draft.show_non_empty_only,
                    Field::Order => self.cycle_order(false),
                }
                ModalOutcome::Continue
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                match FIELDS[self.cursor] {
                    Field::ShowNonEmptyOnly => self.draft.show_non_empty_only = !self.draft.show_non_empty_only,
                    Field::Order => self.cycle_order(true),
                }
                ModalOutcome::Continue
            }
            KeyCode::Enter => {
                self.decision = Some(self.draft.clone());
                ModalOutcome::Close
            }
            _ => ModalOutcome::Continue,
        }
    }
}
