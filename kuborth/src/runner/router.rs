//! Top-level input routing: turns a key or mouse event into panel
//! navigation, a modal action, shell input, or a background command,
//! owning the priority order between global shortcuts, an open modal, an
//! open viewer, a full-screen shell, and ordinary panel navigation
//! (§4.4 "Key routing").

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use ratatui::layout::Rect;

use crate::app::types::{EditRequest, Side};
use crate::app::PendingAction;
use crate::app::App;
use crate::input::{Key, KeyCode, MouseEvent, MouseEventKind, MouseButton};
use crate::modal::confirm::ConfirmDialog;
use crate::modal::create_namespace::CreateNamespaceDialog;
use crate::modal::message::MessageDialog;
use crate::modal::theme_selector::{ThemePreview, ThemeSelectorDialog};
use crate::modal::view_options::ViewOptionsDialog;
use crate::modal::{EscFeed, ModalHandled};
use crate::runner::commands;
use crate::shell::ShellPresentation;
use crate::viewer::AVAILABLE_THEMES;

/// Writes a theme selector's live preview into the cell `App` shares with
/// the open viewer, reverting to `original` if the dialog is dismissed
/// without committing.
struct AppThemePreview {
    cell: Arc<Mutex<String>>,
    original: String,
}

impl ThemePreview for AppThemePreview {
    fn preview(&mut self, theme: &str) {
        *self.cell.lock().unwrap() = theme.to_string();
    }

    fn commit(&mut self, theme: &str) {
        *self.cell.lock().unwrap() = theme.to_string();
    }

    fn cancel(&mut self) {
        *self.cell.lock().unwrap() = self.original.clone();
    }
}

/// Route one key event. Returns `true` if the application should quit.
pub fn route_key(app: &mut App, key: &Key, now: Instant, tx: &Sender<commands::Message>) -> bool {
    if key.is_ctrl_char('q') {
        return true;
    }
    if key.is_ctrl_char('o') {
        app.shell_presentation = match app.shell_presentation {
            ShellPresentation::Compact => ShellPresentation::FullScreen,
            ShellPresentation::FullScreen => ShellPresentation::Compact,
        };
        return false;
    }
    if key.code == KeyCode::Tab {
        app.toggle_active_panel();
        return false;
    }
    if key.code == KeyCode::F(10) && app.shell_presentation != ShellPresentation::FullScreen {
        return true;
    }

    if !app.modals.is_empty() {
        match app.modals.handle_key(key, now) {
            ModalHandled::Closed => handle_modal_closed(app, tx),
            ModalHandled::RequestTheme => open_theme_selector(app),
            ModalHandled::Consumed | ModalHandled::NoModal => {}
        }
        return false;
    }

    match app.router_esc.feed(key, now) {
        EscFeed::Armed => return false,
        EscFeed::DoubleEsc => {
            if app.viewer.is_some() {
                app.close_viewer();
            }
            return false;
        }
        EscFeed::Digit(9) if app.viewer.is_some() => {
            open_theme_selector(app);
            return false;
        }
        EscFeed::Digit(n) => return dispatch_function_key(app, n, now, tx),
        EscFeed::Unrelated => {}
    }

    if app.viewer.is_some() {
        route_viewer_key(app, key);
        return false;
    }

    if app.shell_presentation == ShellPresentation::FullScreen {
        route_to_shell(app, key, tx);
        return false;
    }

    route_panel_key(app, key, now, tx)
}

fn route_viewer_key(app: &mut App, key: &Key) {
    let Some(viewer) = app.viewer.as_mut() else { return };
    match &key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(3) => app.close_viewer(),
        KeyCode::Up => viewer.scroll_up(1),
        KeyCode::Down => viewer.scroll_down(1, 1),
        KeyCode::PageUp => viewer.scroll_up(10),
        KeyCode::PageDown => viewer.scroll_down(10, 1),
        KeyCode::Home => viewer.scroll_home(),
        KeyCode::End => viewer.scroll_end(1),
        _ => {}
    }
}

/// Apply the just-closed modal's decision to `App`, downcasting it by the
/// `Modal::as_any_mut` hook since the stack only reports that *something*
/// closed, never what it decided. Also called from the event loop's tick
/// when a lone-Esc timeout auto-closes the top modal.
pub fn handle_modal_closed(app: &mut App, tx: &Sender<commands::Message>) {
    let Some(mut modal) = app.modals.take_closed() else { return };

    if modal.name() == "confirm" {
        if let Some(dlg) = modal.as_any_mut().downcast_mut::<ConfirmDialog>() {
            if dlg.take_decision() == Some(true) {
                if let Some(PendingAction::DeleteObject { .. }) = app.pending_action.take() {
                    commands::delete_selected(app, tx);
                }
            } else {
                app.pending_action = None;
            }
        }
        return;
    }

    if modal.name() == "create-namespace" {
        if let Some(dlg) = modal.as_any_mut().downcast_mut::<CreateNamespaceDialog>() {
            app.pending_action = None;
            if let Some(name) = dlg.take_decision() {
                commands::create_namespace(app, tx, name);
            }
        }
        return;
    }

    if modal.name() == "view-options" {
        if let Some(dlg) = modal.as_any_mut().downcast_mut::<ViewOptionsDialog>() {
            if let Some(decision) = dlg.take_decision() {
                app.settings.resources.show_non_empty_only = decision.show_non_empty_only;
                app.settings.resources.order = decision.resource_order;
            }
        }
        return;
    }

    if modal.name() == "theme-selector" {
        let theme = app.theme_cell.lock().unwrap().clone();
        app.settings.viewer.theme = theme.clone();
        if let Some(viewer) = app.viewer.as_mut() {
            viewer.commit_preview();
        }
    }
}

fn open_theme_selector(app: &mut App) {
    let original = app.theme_cell.lock().unwrap().clone();
    let current = app.settings.viewer.theme.clone();
    *app.theme_cell.lock().unwrap() = current.clone();
    let preview = Box::new(AppThemePreview { cell: app.theme_cell.clone(), original });
    let themes: Vec<String> = AVAILABLE_THEMES.iter().map(|s| s.to_string()).collect();
    app.modals.push(Box::new(ThemeSelectorDialog::new(themes, current, preview)));
}

fn open_delete_confirm(app: &mut App) {
    let ctx = app.folder_ctx();
    let Ok(Some(row)) = app.active_panel().current_row(&ctx) else { return };
    let Some(obj) = row.object.clone() else { return };
    app.pending_action = Some(PendingAction::DeleteObject {
        side: app.active,
        path: app.active_panel().navigator().path(),
        id: row.id,
    });
    let prompt = format!("Delete {}/{}?", obj.gvr, obj.name);
    app.modals.push(Box::new(ConfirmDialog::new(prompt)));
}

fn request_edit(app: &mut App) {
    let ctx = app.folder_ctx();
    let Ok(Some(row)) = app.active_panel().current_row(&ctx) else { return };
    let Some(obj) = row.object.clone() else { return };
    app.pending_edit = Some(EditRequest {
        gvr_display: obj.gvr.to_string(),
        name: obj.name,
        namespace: obj.namespace,
    });
}

/// Dispatch a function-key action (1..=10, where 10 means F10). Returns
/// `true` for F10 (quit).
fn dispatch_function_key(app: &mut App, n: u8, now: Instant, tx: &Sender<commands::Message>) -> bool {
    let ctx = app.folder_ctx();
    let caps = app.active_panel().capabilities(&ctx, true, true, true);
    match n {
        1 if caps.has_help => {
            app.modals.push(Box::new(MessageDialog::info(
                "Help",
                "F1 Help  F2 View Options  F3 View  F4 Edit  F7 New Namespace\nF8 Delete  F9 Context Menu  F10 Quit  Ctrl+O Shell  Esc Esc Close",
            )));
        }
        2 if caps.has_options => {
            let view = crate::folder::ViewOptions {
                resource_order: app.settings.resources.order,
                favorites: app.settings.resources.favorites.clone(),
                show_non_empty_only: app.settings.resources.show_non_empty_only,
            };
            app.modals.push(Box::new(ViewOptionsDialog::new(view)));
        }
        3 if caps.can_view => commands::view_selected(app, now),
        4 if caps.can_edit => request_edit(app),
        5 | 6 => {}
        7 if caps.can_create_ns => {
            app.pending_action = Some(PendingAction::CreateNamespace { side: app.active });
            app.modals.push(Box::new(CreateNamespaceDialog::new()));
        }
        8 if caps.can_delete => open_delete_confirm(app),
        9 if caps.has_context_menu => {
            app.modals.push(Box::new(MessageDialog::info("Context Menu", "No context actions available.")));
        }
        10 => return true,
        _ => {}
    }
    let _ = tx;
    false
}

/// Panel-mode dispatch (§4.4 "Routing table"). Navigation and multi-select
/// keys reach the active panel unconditionally; `Enter`/`Left`/`Right`/`+`/
/// `-` go to the panel only while the shell has no unsent input, otherwise
/// everything falls through to [`route_to_shell`].
fn route_panel_key(app: &mut App, key: &Key, now: Instant, tx: &Sender<commands::Message>) -> bool {
    if let KeyCode::F(n) = key.code {
        return dispatch_function_key(app, n, now, tx);
    }

    // Rule 5: Enter/Ctrl+C with unsent input deliver to the shell and clear
    // the typed flag; handled here so the catch-all below never sees it.
    if key.is_ctrl_char('c') {
        if app.shell.has_input() {
            if let Some(line) = app.shell.submit() {
                commands::run_shell_line(app, tx, line);
            }
            app.shell.clear_typed();
        }
        return false;
    }

    if key.is_ctrl_char('t') || key.code == KeyCode::Insert {
        let ctx = app.folder_ctx();
        let _ = app.active_panel_mut().toggle_selection(&ctx, 20);
        return false;
    }
    if key.is_ctrl_char('a') {
        let ctx = app.folder_ctx();
        let _ = app.active_panel_mut().select_all(&ctx);
        return false;
    }
    if key.is_ctrl_char('w') {
        app.active_panel_mut().clear_selection();
        return false;
    }
    if key.is_ctrl_char('r') {
        let ctx = app.folder_ctx();
        let _ = app.active_panel_mut().refresh_folder(&ctx);
        return false;
    }
    if key.is_ctrl_char('s') {
        // Reserved: per §7, saves happen only from dialogs that explicitly
        // request "save as defaults"; there's no generic panel save.
        return false;
    }

    match &key.code {
        KeyCode::Char('*') => {
            let ctx = app.folder_ctx();
            let _ = app.active_panel_mut().invert_selection(&ctx);
            return false;
        }
        KeyCode::Up => {
            let ctx = app.folder_ctx();
            let _ = app.active_panel_mut().move_up(&ctx, 20);
            return false;
        }
        KeyCode::Down => {
            let ctx = app.folder_ctx();
            let _ = app.active_panel_mut().move_down(&ctx, 20);
            return false;
        }
        KeyCode::PageUp => {
            let ctx = app.folder_ctx();
            let _ = app.active_panel_mut().page_up(&ctx, 20);
            return false;
        }
        KeyCode::PageDown => {
            let ctx = app.folder_ctx();
            let _ = app.active_panel_mut().page_down(&ctx, 20);
            return false;
        }
        KeyCode::Home => {
            let ctx = app.folder_ctx();
            let _ = app.active_panel_mut().home(&ctx, 20);
            return false;
        }
        KeyCode::End => {
            let ctx = app.folder_ctx();
            let _ = app.active_panel_mut().end(&ctx, 20);
            return false;
        }
        KeyCode::Enter if !app.shell.has_input() => {
            let ctx = app.folder_ctx();
            match app.active_panel_mut().enter_selected(&ctx) {
                Ok(_) => {}
                Err(e) => {
                    if !e.is_silent() && !e.is_quiet() {
                        if let Some(text) = crate::errors::render_folder_error(&e, "") {
                            app.post_toast(text, now);
                        }
                    }
                }
            }
            return false;
        }
        KeyCode::Left if !app.shell.has_input() => {
            let ctx = app.folder_ctx();
            let _ = app.active_panel_mut().go_back(&ctx);
            return false;
        }
        KeyCode::Right if !app.shell.has_input() => {
            let ctx = app.folder_ctx();
            let _ = app.active_panel_mut().enter_selected(&ctx);
            return false;
        }
        KeyCode::Char('+') if !app.shell.has_input() => {
            let ctx = app.folder_ctx();
            let _ = app.active_panel_mut().select_all(&ctx);
            return false;
        }
        KeyCode::Char('-') if !app.shell.has_input() => {
            app.active_panel_mut().clear_selection();
            return false;
        }
        KeyCode::Backspace => {
            app.shell.backspace();
            return false;
        }
        _ => {}
    }

    route_to_shell(app, key, tx);
    false
}

fn route_to_shell(app: &mut App, key: &Key, tx: &Sender<commands::Message>) {
    match &key.code {
        KeyCode::Char(c) => app.shell.type_char(*c),
        KeyCode::Backspace => app.shell.backspace(),
        KeyCode::Enter => {
            if let Some(line) = app.shell.submit() {
                commands::run_shell_line(app, tx, line);
            }
        }
        _ => {}
    }
}

const FN_BAR_SEGMENTS: u16 = 10;

fn within(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Route a mouse event against the 3-row layout the renderer lays out:
/// a 1-row header, a content area split 50/50 between panels, and a
/// 1-row function-key bar at the bottom.
pub fn route_mouse(app: &mut App, ev: &MouseEvent, header: Rect, left: Rect, right: Rect, fn_bar: Rect, now: Instant, tx: &Sender<commands::Message>) {
    let _ = header;

    if within(fn_bar, ev.column, ev.row) {
        if let MouseEventKind::Down(MouseButton::Left) = &ev.kind {
            let seg_w = (fn_bar.width / FN_BAR_SEGMENTS).max(1);
            let n = (((ev.column - fn_bar.x) / seg_w) + 1).min(10) as u8;
            dispatch_function_key(app, n, now, tx);
        }
        return;
    }

    let side_rect = if within(left, ev.column, ev.row) {
        Some((Side::Left, left))
    } else if within(right, ev.column, ev.row) {
        Some((Side::Right, right))
    } else {
        None
    };
    let Some((side, rect)) = side_rect else { return };

    match &ev.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.active = side;
            let ctx = app.folder_ctx();
            let idx = app.panel(side).scroll_top() + (ev.row - rect.y) as usize;
            if app.panel_mut(side).select_at(&ctx, idx).is_ok() {
                let Ok(Some(row)) = app.panel(side).current_row(&ctx) else { return };
                if app.panel_mut(side).register_click(&row.id, now) {
                    let _ = app.panel_mut(side).enter_selected(&ctx);
                }
            }
        }
        MouseEventKind::ScrollUp => {
            let ctx = app.folder_ctx();
            let _ = app.panel_mut(side).move_up(&ctx, rect.height as usize);
        }
        MouseEventKind::ScrollDown => {
            let ctx = app.folder_ctx();
            let _ = app.panel_mut(side).move_down(&ctx, rect.height as usize);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::settings::Settings;
    use crate::app::types::StartOptions;
    use std::sync::mpsc::channel;

    fn test_app() -> App {
        App::new(StartOptions::default(), Settings::default())
    }

    #[test]
    fn ctrl_q_requests_quit() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        let quit = route_key(&mut app, &Key::ctrl('q'), Instant::now(), &tx);
        assert!(quit);
    }

    #[test]
    fn f10_requests_quit() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        let now = Instant::now();
        // F10 is armed through the Esc-then-digit sequence the same way the
        // renderer's fn-bar maps clicks to function keys.
        assert!(!route_key(&mut app, &Key::plain(KeyCode::Esc), now, &tx));
        let quit = route_key(&mut app, &Key::plain(KeyCode::Char('0')), now, &tx);
        assert!(quit);
    }

    #[test]
    fn tab_toggles_active_panel() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        assert_eq!(app.active, Side::Left);
        route_key(&mut app, &Key::plain(KeyCode::Tab), Instant::now(), &tx);
        assert_eq!(app.active, Side::Right);
    }

    #[test]
    fn ctrl_o_toggles_shell_presentation() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        assert_eq!(app.shell_presentation, ShellPresentation::Compact);
        route_key(&mut app, &Key::ctrl('o'), Instant::now(), &tx);
        assert_eq!(app.shell_presentation, ShellPresentation::FullScreen);
    }

    #[test]
    fn global_tab_cycles_panels_even_with_a_modal_open() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        app.modals.push(Box::new(MessageDialog::info("Help", "body")));
        assert_eq!(app.active, Side::Left);
        route_key(&mut app, &Key::plain(KeyCode::Tab), Instant::now(), &tx);
        assert_eq!(app.active, Side::Right);
        assert_eq!(app.modals.depth(), 1);
    }

    #[test]
    fn literal_f10_quits_outside_fullscreen_shell() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        assert!(route_key(&mut app, &Key::plain(KeyCode::F(10)), Instant::now(), &tx));
    }

    #[test]
    fn literal_f10_does_not_quit_in_fullscreen_shell() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        app.shell_presentation = ShellPresentation::FullScreen;
        assert!(!route_key(&mut app, &Key::plain(KeyCode::F(10)), Instant::now(), &tx));
    }

    #[test]
    fn up_down_reach_the_panel_even_while_the_shell_has_typed_input() {
        let mut app = test_app();
        // Back to root, where the synthetic "contexts"/"namespaces" rows
        // give more than one row to move across.
        let ctx = app.folder_ctx();
        app.active_panel_mut().go_back(&ctx).unwrap();
        app.active_panel_mut().reset_selection_top();
        let (tx, _rx) = channel();
        app.shell.type_char('g');
        assert!(app.shell.has_input());
        route_key(&mut app, &Key::plain(KeyCode::Down), Instant::now(), &tx);
        assert_eq!(app.active_panel().selected_index(), 1);
    }

    #[test]
    fn ctrl_t_toggles_the_mark_on_the_selected_row() {
        let mut app = test_app();
        let ctx = app.folder_ctx();
        app.active_panel_mut().go_back(&ctx).unwrap();
        let (tx, _rx) = channel();
        let ctx = app.folder_ctx();
        let Ok(Some(row)) = app.active_panel().current_row(&ctx) else { panic!("expected a row") };
        route_key(&mut app, &Key::ctrl('t'), Instant::now(), &tx);
        assert!(app.active_panel().is_marked(&row.id));
    }

    #[test]
    fn star_inverts_selection_regardless_of_shell_input() {
        let mut app = test_app();
        let ctx = app.folder_ctx();
        app.active_panel_mut().go_back(&ctx).unwrap();
        let (tx, _rx) = channel();
        app.shell.type_char('x');
        route_key(&mut app, &Key::plain(KeyCode::Char('*')), Instant::now(), &tx);
        let ctx = app.folder_ctx();
        let len = app.active_panel().navigator().current().len(&ctx).unwrap();
        if len > 0 {
            let Ok(Some(row)) = app.active_panel().current_row(&ctx) else { panic!("expected a row") };
            assert!(app.active_panel().is_marked(&row.id));
        }
    }

    #[test]
    fn ctrl_c_submits_unsent_shell_input_and_clears_typed_flag() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        app.shell.type_char('l');
        app.shell.type_char('s');
        assert!(app.shell.has_input());
        route_key(&mut app, &Key::ctrl('c'), Instant::now(), &tx);
        assert!(!app.shell.has_input());
    }

    #[test]
    fn ctrl_c_is_a_noop_when_the_shell_has_no_unsent_input() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        assert!(!app.shell.has_input());
        route_key(&mut app, &Key::ctrl('c'), Instant::now(), &tx);
        assert!(!app.shell.has_input());
    }

    #[test]
    fn mouse_click_in_fn_bar_routes_to_function_key() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        let fn_bar = Rect::new(0, 23, 80, 1);
        // F1 (Help) occupies the first of ten equal segments.
        let ev = MouseEvent { column: 2, row: 23, kind: MouseEventKind::Down(MouseButton::Left) };
        route_mouse(&mut app, &ev, Rect::new(0, 0, 80, 1), Rect::new(0, 1, 40, 22), Rect::new(40, 1, 40, 22), fn_bar, Instant::now(), &tx);
        assert_eq!(app.modals.depth(), 1);
    }

    #[test]
    fn mouse_click_in_right_panel_activates_it() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        let left = Rect::new(0, 1, 40, 22);
        let right = Rect::new(40, 1, 40, 22);
        let ev = MouseEvent { column: 45, row: 2, kind: MouseEventKind::Down(MouseButton::Left) };
        route_mouse(&mut app, &ev, Rect::new(0, 0, 80, 1), left, right, Rect::new(0, 23, 80, 1), Instant::now(), &tx);
        assert_eq!(app.active, Side::Right);
    }

    #[test]
    fn mouse_click_outside_any_rect_is_ignored() {
        let mut app = test_app();
        let (tx, _rx) = channel();
        let ev = MouseEvent { column: 0, row: 0, kind: MouseEventKind::Down(MouseButton::Left) };
        route_mouse(&mut app, &ev, Rect::new(0, 0, 0, 0), Rect::new(0, 1, 40, 22), Rect::new(40, 1, 40, 22), Rect::new(0, 23, 80, 1), Instant::now(), &tx);
        assert_eq!(app.active, Side::Left);
    }
}
