//! Top-level frame layout: a 1-row status header, two side-by-side panels,
//! and a 1-row function-key bar, with the viewer and any open modal drawn
//! as overlays (§4.3 "Layout").

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::App;
use crate::app::types::Side;

pub mod bar_ui;
pub mod colors;
pub mod dialogs;
pub mod header;
pub mod modal;
pub mod panels;
pub mod util;
pub mod viewer_ui;

/// The panel/header/fn-bar rectangles the router needs for mouse hit
/// testing, returned so the event loop can pass them straight through.
#[derive(Clone, Copy)]
pub struct Chrome {
    pub header: Rect,
    pub left: Rect,
    pub right: Rect,
    pub fn_bar: Rect,
}

/// Pure layout split, callable outside of a `Frame` so the event loop can
/// recompute the same rectangles for mouse hit testing between redraws.
pub fn layout_chrome(area: Rect) -> (Chrome, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(area);
    let header_row = rows[0];
    let content_row = rows[1];
    let fn_bar_row = rows[2];

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(content_row);

    (Chrome { header: header_row, left: cols[0], right: cols[1], fn_bar: fn_bar_row }, content_row)
}

pub fn ui(f: &mut Frame, app: &App) -> Chrome {
    let area = f.area();
    let (chrome, content_row) = layout_chrome(area);
    let left_area = chrome.left;
    let right_area = chrome.right;
    let header_row = chrome.header;
    let fn_bar_row = chrome.fn_bar;

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)].as_ref())
        .split(left_area);
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)].as_ref())
        .split(right_area);

    let ctx = app.folder_ctx();

    header::draw_panel_header(
        f,
        left_chunks[0],
        &app.panel(Side::Left).navigator().path().to_string(),
        app.active == Side::Left,
    );
    header::draw_panel_header(
        f,
        right_chunks[0],
        &app.panel(Side::Right).navigator().path().to_string(),
        app.active == Side::Right,
    );

    panels::draw_list(f, left_chunks[1], &ctx, app.panel(Side::Left), app.active == Side::Left);
    panels::draw_list(f, right_chunks[1], &ctx, app.panel(Side::Right), app.active == Side::Right);

    let busy_frame = if app.is_busy_visible() { Some(app.busy_frame()) } else { None };
    let context = app.kubeconfig.current_context().unwrap_or_else(|| "default".to_string());
    header::draw_status_header(f, header_row, &context, app.current_toast(), busy_frame);

    let caps = app.active_panel().capabilities(&ctx, true, true, true);
    bar_ui::draw_fn_bar(f, fn_bar_row, &caps);

    if let Some(viewer) = app.viewer.as_ref() {
        viewer_ui::draw_viewer(f, content_row, viewer);
    }

    if let Some(modal) = app.modals.top() {
        dialogs::draw_modal(f, area, modal);
    }

    Chrome { header: header_row, left: left_area, right: right_area, fn_bar: fn_bar_row }
}
