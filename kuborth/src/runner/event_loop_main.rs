//! Main event loop: draws a frame, polls for coalesced input, dispatches
//! keys/mouse through the router, and drains the background-command
//! channel (§5 "The event loop").

use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

use crate::app::settings::load_settings;
use crate::app::types::{Side, StartOptions};
use crate::app::App;
use crate::input::{poll, read_event, InputEvent, MouseEvent, MouseEventKind};
use crate::runner::commands::{self, Message};
use crate::runner::router;
use crate::runner::terminal::{
    restore_terminal, resume_terminal_for_subprocess, suspend_terminal_for_subprocess, TerminalGuard,
};
use crate::ui;

const FRAME_POLL: Duration = Duration::from_millis(100);
const COALESCE_POLL: Duration = Duration::from_millis(5);
const MAX_COALESCED_EVENTS: usize = 1024;
const BUSY_TICK: Duration = Duration::from_millis(100);
const FOLDER_TICK: Duration = Duration::from_secs(1);

pub fn run_app(
    mut terminal: TerminalGuard,
    shutdown_rx: Receiver<()>,
    start_opts: StartOptions,
) -> anyhow::Result<()> {
    let settings = load_settings();
    crate::ui::colors::set_theme(&settings.viewer.theme);

    let mut app = App::new(start_opts, settings);
    let (tx, rx) = channel::<Message>();
    let mut last_busy_tick = Instant::now();
    let mut last_folder_tick = Instant::now();

    loop {
        if shutdown_rx.try_recv().is_ok() {
            break;
        }

        drain_commands(&mut app, &rx);

        let now = Instant::now();
        app.router_esc.tick(now);
        if app.modals.tick(now) {
            router::handle_modal_closed(&mut app, &tx);
        }

        if app.is_busy_visible() && last_busy_tick.elapsed() >= BUSY_TICK {
            app.tick_busy_frame();
            last_busy_tick = Instant::now();
        }

        if last_folder_tick.elapsed() >= FOLDER_TICK {
            tick_folder_refresh(&mut app);
            last_folder_tick = Instant::now();
        }

        crate::panic_hook::record_state(crate::panic_hook::LastKnownState {
            context: app.kubeconfig.current_context().unwrap_or_else(|| "default".to_string()),
            side: match app.active {
                Side::Left => "left",
                Side::Right => "right",
            },
            left_path: app.panel(Side::Left).navigator().path().to_string(),
            right_path: app.panel(Side::Right).navigator().path().to_string(),
        });

        terminal.draw(|f| {
            ui::ui(f, &app);
        })?;
        let term_size = terminal.size()?;
        let (chrome, _) = ui::layout_chrome(ratatui::layout::Rect::new(0, 0, term_size.width, term_size.height));

        if let Some(req) = app.pending_edit.take() {
            run_external_edit(&mut app, &mut terminal, req)?;
            continue;
        }

        if !poll(FRAME_POLL)? {
            continue;
        }

        let mut events = vec![read_event()?];
        while poll(COALESCE_POLL)? {
            events.push(read_event()?);
            if events.len() >= MAX_COALESCED_EVENTS {
                break;
            }
        }

        let mut should_quit = false;
        let mut last_move: Option<MouseEvent> = None;
        for ev in events {
            let now = Instant::now();
            match ev {
                InputEvent::Key(key) => {
                    if router::route_key(&mut app, &key, now, &tx) {
                        should_quit = true;
                        break;
                    }
                }
                InputEvent::Mouse(m) => {
                    if matches!(m.kind, MouseEventKind::Move) {
                        last_move = Some(m);
                    } else {
                        router::route_mouse(&mut app, &m, chrome.header, chrome.left, chrome.right, chrome.fn_bar, now, &tx);
                    }
                }
                InputEvent::Resize(_, _) | InputEvent::Other => {}
            }
        }
        if let Some(m) = last_move {
            router::route_mouse(&mut app, &m, chrome.header, chrome.left, chrome.right, chrome.fn_bar, Instant::now(), &tx);
        }

        if should_quit {
            break;
        }
    }

    app.shut_down();
    restore_terminal(terminal)?;
    Ok(())
}

/// Refresh any panel whose current folder reports dirty (§4.4 "Periodic
/// refresh"), called at most once a second.
fn tick_folder_refresh(app: &mut App) {
    let ctx = app.folder_ctx();
    for side in [Side::Left, Side::Right] {
        if app.panel(side).is_dirty() {
            let _ = app.panel_mut(side).refresh_folder(&ctx);
        }
    }
}

fn drain_commands(app: &mut App, rx: &Receiver<Message>) {
    let now = Instant::now();
    while let Ok(msg) = rx.try_recv() {
        match msg {
            Message::BusyShow(token) => app.show_busy(token),
            Message::BusyDone(token, outcome) => commands::apply_outcome(app, token, outcome, now),
        }
    }
}

/// F4 "Edit": suspend the TUI, shell out to `kubectl edit`, and resume.
/// The one suspension point the event loop runs directly rather than
/// through a background command, since it needs exclusive control of the
/// terminal while the external editor is attached.
fn run_external_edit(app: &mut App, terminal: &mut TerminalGuard, req: crate::app::types::EditRequest) -> anyhow::Result<()> {
    let context = app.kubeconfig.current_context().unwrap_or_else(|| "default".to_string());
    let Some(kubeconfig_path) = app.kubeconfig.path_for_context(&context) else {
        app.post_toast("no kubeconfig available for edit", Instant::now());
        return Ok(());
    };
    let kubeconfig_path = kubeconfig_path.to_string_lossy().into_owned();
    let args = commands::kubectl_edit_args(&req.gvr_display, &req.name, &context, &kubeconfig_path, req.namespace.as_deref());

    crate::runner::terminal::disable_mouse_capture_on_terminal(terminal).ok();
    suspend_terminal_for_subprocess(terminal).ok();

    let status = std::process::Command::new("kubectl").args(&args).status();

    resume_terminal_for_subprocess(terminal).ok();
    crate::runner::terminal::enable_mouse_capture_on_terminal(terminal).ok();

    let now = Instant::now();
    match status {
        Ok(s) if s.success() => app.post_toast(format!("edited {}/{}", req.gvr_display, req.name), now),
        Ok(s) => app.post_toast(format!("kubectl edit exited with {s}"), now),
        Err(e) => app.post_toast(format!("failed to launch kubectl edit: {e}"), now),
    }
    let ctx = app.folder_ctx();
    let _ = app.active_panel_mut().refresh_folder(&ctx);
    Ok(())
}
