use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::ctx::FolderCtx;
use crate::panel::Panel;
use crate::ui::colors::current as theme_current;
use crate::ui::util::truncate_to_width;

/// Render a panel's visible `Row`s as a bordered, scrollable table against
/// its folder's column schema (§4.3 "Panel list").
pub fn draw_list(f: &mut Frame, area: Rect, ctx: &FolderCtx, panel: &Panel, active: bool) {
    let theme = theme_current();

    let list_height = (area.height as usize).saturating_sub(2);
    let columns = panel.columns().to_vec();
    let rows = panel.visible_rows(ctx, list_height).unwrap_or_default();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(area);

    let col_count = columns.len().max(1);
    let col_width = (cols[0].width as usize).saturating_sub(2) / col_count;

    let mut header_spans: Vec<Span> = Vec::new();
    for (i, col) in columns.iter().enumerate() {
        if i > 0 {
            header_spans.push(Span::raw(" │ "));
        }
        header_spans.push(Span::styled(format!("{:<width$}", col, width = col_width), theme.header_style));
    }

    let mut items: Vec<ListItem> = Vec::with_capacity(rows.len() + 1);
    items.push(ListItem::new(Text::from(Line::from(header_spans))));

    let selected_index = panel.selected_index();
    let scroll_top = panel.scroll_top();

    for row in rows.iter() {
        let style = if row.back {
            theme.back_row
        } else if panel.is_marked(&row.id) {
            theme.marked_row
        } else {
            theme.object_row
        };
        let mut spans: Vec<Span> = Vec::new();
        for (i, cell) in row.cells.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" │ "));
            }
            spans.push(Span::styled(format!("{:<width$}", truncate_to_width(cell, col_width), width = col_width), style));
        }
        items.push(ListItem::new(Text::from(Line::from(spans))));
    }

    let title = panel.navigator().path().to_string();
    let border_style = if active { theme.border_active } else { theme.border_inactive };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title).style(border_style))
        .highlight_style(theme.highlight_style);

    let mut state = ListState::default();
    if selected_index >= scroll_top && selected_index < scroll_top + list_height {
        // +1 to skip the header row occupying items[0]
        state.select(Some(selected_index - scroll_top + 1));
    } else {
        state.select(None);
    }
    f.render_stateful_widget(list, cols[0], &mut state);

    let total = panel.navigator().current().len(ctx).unwrap_or(0);
    let mut sb_state = ScrollbarState::new(total).position(scroll_top).viewport_content_length(list_height);
    let sb = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_style(theme.scrollbar_thumb_style)
        .track_style(theme.scrollbar_style);
    f.render_stateful_widget(sb, cols[1], &mut sb_state);
}
