use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::ui::colors::current as theme_current;
use crate::viewer::Viewer;

/// Draw the full-area text viewer overlay: a bordered pane titled with the
/// viewed object's name, scrolled content, and a vertical scrollbar.
pub fn draw_viewer(f: &mut Frame, area: Rect, viewer: &Viewer) {
    let theme = theme_current();
    f.render_widget(Clear, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(area);

    let viewport = (cols[0].height as usize).saturating_sub(2);
    let lines = viewer.lines();
    let visible_end = (viewer.scroll() + viewport).min(lines.len());
    let visible: Vec<Line> = lines[viewer.scroll()..visible_end].iter().map(|l| Line::from(l.as_str())).collect();

    let title = format!("{} [{}]", viewer.title(), viewer.theme());
    let body = Paragraph::new(Text::from(visible))
        .block(Block::default().borders(Borders::ALL).title(title).style(theme.border_active));
    f.render_widget(body, cols[0]);

    let mut sb_state = ScrollbarState::new(lines.len()).position(viewer.scroll()).viewport_content_length(viewport);
    let sb = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_style(theme.scrollbar_thumb_style)
        .track_style(theme.scrollbar_style);
    f.render_stateful_widget(sb, cols[1], &mut sb_state);
}
