//! Theme selector, opened from `Esc 9` over a viewer/editor that supports
//! `RequestTheme`, or from a settings dialog. Moving the selection previews
//! the theme live; cancelling reverts it via `on_close`.

use crate::input::{Key, KeyCode};
use crate::modal::{Modal, ModalGeometry, ModalOutcome};

/// Callback the dialog drives as the selection moves and on cancel. Kept
/// as a trait object so the dialog doesn't need to know about `Viewer`.
pub trait ThemePreview: Send {
    fn preview(&mut self, theme: &str);
    fn commit(&mut self, theme: &str);
    fn cancel(&mut self);
}

pub struct ThemeSelectorDialog {
    themes: Vec<String>,
    original: String,
    cursor: usize,
    preview: Box<dyn ThemePreview>,
    committed: bool,
}

impl ThemeSelectorDialog {
    pub fn new(themes: Vec<String>, current: impl Into<String>, preview: Box<dyn ThemePreview>) -> Self {
        let original = current.into();
        let cursor = themes.iter().position(|t| t == &original).unwrap_or(0);
        ThemeSelectorDialog { themes, original, cursor, preview, committed: false }
    }

    pub fn selected(&self) -> Option<&str> {
        self.themes.get(self.cursor).map(String::as_str)
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.themes.is_empty() {
            return;
        }
        let len = self.themes.len() as isize;
        let next = (self.cursor as isize + delta).rem_euclid(len);
        self.cursor = next as usize;
        if let Some(theme) = self.selected() {
            self.preview.preview(&theme.to_string());
        }
    }
}

impl Modal for ThemeSelectorDialog {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> &str {
        "theme-selector"
    }

    fn geometry(&self) -> ModalGeometry {
        ModalGeometry::Windowed { win_w: 30, win_h: 12, offset: (0, 0) }
    }

    fn handle_key(&mut self, key: &Key) -> ModalOutcome {
        match &key.code {
            KeyCode::Up => {
                self.move_cursor(-1);
                ModalOutcome::Continue
            }
            KeyCode::Down => {
                self.move_cursor(1);
                ModalOutcome::Continue
            }
            KeyCode::Enter => {
                if let Some(theme) = self.selected().map(str::to_string) {
                    self.preview.commit(&theme);
                    self.committed = true;
                }
                ModalOutcome::Close
            }
            _ => ModalOutcome::Continue,
        }
    }

    fn on_close(&mut self) {
        if !self.committed {
            self.preview.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        previewed: Vec<String>,
        committed: Option<String>,
        cancelled: bool,
    }

    struct RecordingPreview(Arc<Mutex<Recorder>>);

    impl ThemePreview for RecordingPreview {
        fn preview(&mut self, theme: &str) {
            self.0.lock().unwrap().previewed.push(theme.to_string());
        }
        fn commit(&mut self, theme: &str) {
            self.0.lock().unwrap().committed = Some(theme.to_string());
        }
        fn cancel(&mut self) {
            self.0.lock().unwrap().cancelled = true;
        }
    }

    fn dialog() -> (ThemeSelectorDialog, Arc<Mutex<Recorder>>) {
        let rec = Arc::new(Mutex::new(Recorder::default()));
        let themes = vec!["dracula".to_string(), "solarized".to_string(), "nord".to_string()];
        let dlg = ThemeSelectorDialog::new(themes, "dracula", Box::new(RecordingPreview(rec.clone())));
        (dlg, rec)
    }

    #[test]
    fn moving_down_previews_next_theme() {
        let (mut dlg, rec) = dialog();
        dlg.handle_key(&Key::plain(KeyCode::Down));
        assert_eq!(rec.lock().unwrap().previewed, vec!["solarized".to_string()]);
    }

    #[test]
    fn moving_up_wraps_to_last_theme() {
        let (mut dlg, rec) = dialog();
        dlg.handle_key(&Key::plain(KeyCode::Up));
        assert_eq!(rec.lock().unwrap().previewed, vec!["nord".to_string()]);
    }

    #[test]
    fn enter_commits_selection() {
        let (mut dlg, rec) = dialog();
        dlg.handle_key(&Key::plain(KeyCode::Down));
        assert_eq!(dlg.handle_key(&Key::plain(KeyCode::Enter)), ModalOutcome::Close);
        assert_eq!(rec.lock().unwrap().committed.as_deref(), Some("solarized"));
    }

    #[test]
    fn closing_without_enter_cancels_preview_on_close() {
        let (mut dlg, rec) = dialog();
        dlg.handle_key(&Key::plain(KeyCode::Down));
        dlg.on_close();
        assert!(rec.lock().unwrap().cancelled);
    }
}
