//! The bottom function-key bar: F1-F10 labels, dimmed when the active
//! panel's `Capabilities` says that slot has nothing to do (§4.4 "Function
//! key bar").

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::panel::Capabilities;
use crate::ui::colors::current as theme_current;

const LABELS: [&str; 10] =
    ["Help", "Options", "View", "Edit", "", "", "New NS", "Delete", "CtxMenu", "Quit"];

fn enabled(caps: &Capabilities, n: usize) -> bool {
    match n {
        1 => caps.has_help,
        2 => caps.has_options,
        3 => caps.can_view,
        4 => caps.can_edit,
        7 => caps.can_create_ns,
        8 => caps.can_delete,
        9 => caps.has_context_menu,
        10 => true,
        _ => false,
    }
}

pub fn draw_fn_bar(f: &mut Frame, area: Rect, caps: &Capabilities) {
    let theme = theme_current();
    let constraints: Vec<Constraint> = (0..10).map(|_| Constraint::Ratio(1, 10)).collect();
    let cells = Layout::default().direction(Direction::Horizontal).constraints(constraints).split(area);

    for (i, cell) in cells.iter().enumerate() {
        let n = i + 1;
        let on = enabled(caps, n);
        let label = LABELS[i];
        let key_style = if on { theme.fn_bar_key } else { theme.fn_bar_disabled };
        let label_style = if on { theme.fn_bar_label } else { theme.fn_bar_disabled };
        let line = Line::from(vec![
            Span::styled(format!("F{n}"), key_style),
            Span::styled(format!(" {label}"), label_style),
        ]);
        f.render_widget(Paragraph::new(line), *cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_slot_always_enabled() {
        let caps = Capabilities::default();
        assert!(enabled(&caps, 10));
    }

    #[test]
    fn help_slot_follows_capability() {
        let mut caps = Capabilities::default();
        assert!(!enabled(&caps, 1));
        caps.has_help = true;
        assert!(enabled(&caps, 1));
    }
}
