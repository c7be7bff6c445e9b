//! Per-panel header row: breadcrumb path, active marker, and the shared
//! toast/busy-spinner strip drawn above the panels (§4.3 "Header").

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::ui::colors::current as theme_current;

const SPINNER_FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Draw one panel's breadcrumb header, bolded when `active`.
pub fn draw_panel_header(f: &mut Frame, area: Rect, path_display: &str, active: bool) {
    let theme = theme_current();
    let style = if active { theme.header_style } else { theme.border_inactive };
    let text = format!(" {path_display}");
    let p = Paragraph::new(text).style(style).block(Block::default().borders(Borders::BOTTOM).style(style));
    f.render_widget(p, area);
}

/// Draw the top status strip: cluster context on the left, toast text (if
/// any) and busy spinner (if visible) on the right.
pub fn draw_status_header(f: &mut Frame, area: Rect, context: &str, toast: Option<&str>, busy_frame: Option<u8>) {
    let theme = theme_current();
    let mut spans = vec![Span::styled(format!(" {context} "), theme.header_style)];

    if let Some(frame) = busy_frame {
        spans.push(Span::styled(format!(" {} ", SPINNER_FRAMES[frame as usize % 4]), theme.fn_bar_key));
    }

    if let Some(text) = toast {
        spans.push(Span::styled(format!(" {text}"), theme.toast_style));
    }

    let p = Paragraph::new(Line::from(spans));
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_frames_wrap_at_four() {
        assert_eq!(SPINNER_FRAMES[(5usize) % 4], SPINNER_FRAMES[1]);
    }
}
