//! Renders whichever dialog is on top of the modal stack, dispatching on
//! `Modal::name()` since the stack only hands back `&dyn Modal` (§4.5
//! "Modal rendering").

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::modal::confirm::{ConfirmChoice, ConfirmDialog};
use crate::modal::create_namespace::CreateNamespaceDialog;
use crate::modal::message::{MessageDialog, MessageKind};
use crate::modal::theme_selector::ThemeSelectorDialog;
use crate::modal::view_options::ViewOptionsDialog;
use crate::modal::{Modal, ModalGeometry};
use crate::ui::colors::current as theme_current;

/// Resolve a modal's declared geometry to a concrete `Rect` within `area`.
fn geometry_rect(area: Rect, modal: &dyn Modal) -> Rect {
    match modal.geometry() {
        ModalGeometry::FullScreen => area,
        ModalGeometry::Windowed { win_w, win_h, offset } => {
            let base = crate::ui::modal::centered_rect(area, win_w, win_h);
            let x = (base.x as i32 + offset.0 as i32).clamp(0, area.width as i32) as u16;
            let y = (base.y as i32 + offset.1 as i32).clamp(0, area.height as i32) as u16;
            Rect::new(x, y, base.width, base.height)
        }
    }
}

/// Draw the top modal over `area`, reading its concrete fields through
/// `Modal::as_any` rather than needing the stack's mutable API.
pub fn draw_modal(f: &mut Frame, area: Rect, modal: &dyn Modal) {
    let rect = geometry_rect(area, modal);
    f.render_widget(Clear, rect);

    match modal.name() {
        "confirm" => {
            if let Some(dlg) = modal.as_any().downcast_ref::<ConfirmDialog>() {
                draw_confirm(f, rect, dlg);
            }
        }
        "create-namespace" => {
            if let Some(dlg) = modal.as_any().downcast_ref::<CreateNamespaceDialog>() {
                draw_create_namespace(f, rect, dlg);
            }
        }
        "view-options" => {
            if let Some(dlg) = modal.as_any().downcast_ref::<ViewOptionsDialog>() {
                draw_view_options(f, rect, dlg);
            }
        }
        "theme-selector" => {
            if let Some(dlg) = modal.as_any().downcast_ref::<ThemeSelectorDialog>() {
                draw_theme_selector(f, rect, dlg);
            }
        }
        "message" | "error" => {
            if let Some(dlg) = modal.as_any().downcast_ref::<MessageDialog>() {
                draw_message(f, rect, dlg);
            }
        }
        _ => {}
    }
}

fn frame_block<'a>(title: &'a str, style: ratatui::style::Style) -> Block<'a> {
    Block::default().borders(Borders::ALL).title(title).style(style)
}

fn inner(rect: Rect) -> Rect {
    Rect::new(rect.x + 1, rect.y + 1, rect.width.saturating_sub(2), rect.height.saturating_sub(3))
}

fn draw_confirm(f: &mut Frame, rect: Rect, dlg: &ConfirmDialog) {
    let theme = theme_current();
    f.render_widget(frame_block("Confirm", theme.header_style), rect);
    let body = Paragraph::new(dlg.prompt().to_string()).wrap(Wrap { trim: true });
    f.render_widget(body, inner(rect));

    let (yes_style, no_style) = match dlg.selected() {
        ConfirmChoice::Yes => (theme.highlight_style, theme.help_block_style),
        ConfirmChoice::No => (theme.help_block_style, theme.highlight_style),
    };
    let line = Line::from(vec![
        Span::styled("[Yes]", yes_style),
        Span::raw("    "),
        Span::styled("[No]", no_style),
    ]);
    render_footer(f, rect, line);
}

fn draw_create_namespace(f: &mut Frame, rect: Rect, dlg: &CreateNamespaceDialog) {
    let theme = theme_current();
    f.render_widget(frame_block("New Namespace", theme.header_style), rect);
    let mut lines = vec![Line::from(format!("Name: {}_", dlg.typed()))];
    if let Some(err) = dlg.error() {
        lines.push(Line::from(Span::styled(err.to_string(), theme.toast_style)));
    }
    let body = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(body, inner(rect));
}

fn draw_view_options(f: &mut Frame, rect: Rect, dlg: &ViewOptionsDialog) {
    let theme = theme_current();
    f.render_widget(frame_block("View Options", theme.header_style), rect);
    let draft = dlg.draft();
    let row_style = |idx: usize| if dlg.cursor() == idx { theme.highlight_style } else { theme.help_block_style };
    let lines = vec![
        Line::from(Span::styled(
            format!("Show non-empty only: {}", if draft.show_non_empty_only { "On" } else { "Off" }),
            row_style(0),
        )),
        Line::from(Span::styled(format!("Resource order: {:?}", draft.resource_order), row_style(1))),
    ];
    let body = Paragraph::new(lines);
    f.render_widget(body, inner(rect));
}

fn draw_theme_selector(f: &mut Frame, rect: Rect, dlg: &ThemeSelectorDialog) {
    let theme = theme_current();
    f.render_widget(frame_block("Theme", theme.header_style), rect);
    let lines: Vec<Line> = crate::viewer::AVAILABLE_THEMES
        .iter()
        .map(|name| {
            let style = if Some(*name) == dlg.selected() { theme.highlight_style } else { theme.help_block_style };
            Line::from(Span::styled(name.to_string(), style))
        })
        .collect();
    let body = Paragraph::new(lines);
    f.render_widget(body, inner(rect));
}

fn draw_message(f: &mut Frame, rect: Rect, dlg: &MessageDialog) {
    let theme = theme_current();
    let style = match dlg.kind() {
        MessageKind::Error => theme.header_style.fg(Color::Red),
        MessageKind::Info => theme.header_style,
    };
    f.render_widget(frame_block(dlg.title(), style), rect);
    let body = Paragraph::new(dlg.body().to_string()).wrap(Wrap { trim: true });
    f.render_widget(body, inner(rect));
}

fn render_footer(f: &mut Frame, rect: Rect, line: Line) {
    let footer_rect = Rect::new(rect.x + 1, rect.y + rect.height.saturating_sub(2), rect.width.saturating_sub(2), 1);
    f.render_widget(Paragraph::new(line), footer_rect);
}
