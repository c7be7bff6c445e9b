//! The scrollable Text Viewer (§4.6 "TextViewer"): wraps
//! `ViewContent` with scroll position and a pluggable highlighter so theme
//! switching can be previewed live without re-fetching content.

use crate::folder::ViewContent;

/// Theme names offered by the theme selector, in display order.
pub const AVAILABLE_THEMES: [&str; 3] = ["dracula", "solarized", "nord"];

/// Produces styled lines for a body of text. The default
/// [`PlainHighlighter`] performs no styling; a richer highlighter can be
/// swapped in per the active theme without touching the viewer itself.
pub trait Highlighter: Send {
    fn highlight(&self, body: &str, language: &str) -> Vec<String>;
}

#[derive(Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, body: &str, _language: &str) -> Vec<String> {
        body.lines().map(str::to_string).collect()
    }
}

pub struct Viewer {
    content: ViewContent,
    lines: Vec<String>,
    scroll: usize,
    theme: String,
    preview_theme: Option<String>,
}

impl Viewer {
    pub fn new(content: ViewContent, highlighter: &dyn Highlighter, theme: impl Into<String>) -> Self {
        let lines = highlighter.highlight(&content.body, &content.language);
        Viewer { content, lines, scroll: 0, theme: theme.into(), preview_theme: None }
    }

    pub fn title(&self) -> &str {
        &self.content.title
    }

    pub fn filename(&self) -> &str {
        &self.content.filename
    }

    pub fn mime(&self) -> &str {
        &self.content.mime
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn theme(&self) -> &str {
        self.preview_theme.as_deref().unwrap_or(&self.theme)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_down(&mut self, n: usize, viewport: usize) {
        let max = self.lines.len().saturating_sub(viewport);
        self.scroll = (self.scroll + n).min(max);
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_home(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_end(&mut self, viewport: usize) {
        self.scroll = self.lines.len().saturating_sub(viewport);
    }

    /// Apply a live preview theme without committing it; `cancel_preview`
    /// reverts (§4.5 "onClose" revert-on-cancel for the theme dialog).
    pub fn preview_theme(&mut self, theme: impl Into<String>) {
        self.preview_theme = Some(theme.into());
    }

    pub fn commit_preview(&mut self) {
        if let Some(theme) = self.preview_theme.take() {
            self.theme = theme;
        }
    }

    pub fn cancel_preview(&mut self) {
        self.preview_theme = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_highlighter_splits_lines() {
        let content = ViewContent::plain("k", "a\nb\nc".to_string());
        let viewer = Viewer::new(content, &PlainHighlighter, "dracula");
        assert_eq!(viewer.lines(), &["a".to_string(), "b".to_string(), "c".to_string()]);
    }

    #[test]
    fn scroll_clamps_to_content_minus_viewport() {
        let content = ViewContent::plain("k", "1\n2\n3\n4\n5".to_string());
        let mut viewer = Viewer::new(content, &PlainHighlighter, "dracula");
        viewer.scroll_down(100, 2);
        assert_eq!(viewer.scroll(), 3);
    }

    #[test]
    fn preview_theme_reverts_on_cancel() {
        let content = ViewContent::plain("k", "x".to_string());
        let mut viewer = Viewer::new(content, &PlainHighlighter, "dracula");
        viewer.preview_theme("solarized");
        assert_eq!(viewer.theme(), "solarized");
        viewer.cancel_preview();
        assert_eq!(viewer.theme(), "dracula");
    }
}
