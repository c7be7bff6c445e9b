//! Panic hook: force-restores the terminal (leave the alternate screen,
//! disable raw mode) before the normal panic output prints, and writes a
//! best-effort crash report under the platform data dir so a report from
//! the field carries which cluster context and panel the user was looking
//! at, not just a bare backtrace.

use std::io::Write;
use std::panic;
use std::sync::{Mutex, OnceLock};

/// The navigation state the router last reported, read by the panic hook
/// if a panic happens before it can ask `App` directly — by the time the
/// hook runs, unwinding may already have torn down the frame that owned it.
#[derive(Clone, Debug, Default)]
pub struct LastKnownState {
    pub context: String,
    pub side: &'static str,
    pub left_path: String,
    pub right_path: String,
}

static LAST_STATE: OnceLock<Mutex<LastKnownState>> = OnceLock::new();

fn last_state_cell() -> &'static Mutex<LastKnownState> {
    LAST_STATE.get_or_init(|| Mutex::new(LastKnownState::default()))
}

/// Called once per frame by the event loop so a panic has somewhere recent
/// to read from (§5 "crash reports should show what the user was looking
/// at, not just where the code blew up").
pub fn record_state(state: LastKnownState) {
    if let Ok(mut guard) = last_state_cell().lock() {
        *guard = state;
    }
}

/// Install the panic hook: force-restore the terminal, write a crash
/// report (best-effort), then delegate to the previously registered hook
/// so the usual panic message and backtrace still print.
pub fn install_panic_hook() {
    let prev = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        crate::runner::terminal::force_restore();

        let _ = write_crash_report(info);

        eprintln!("\nkuborth: an unexpected error occurred, the program will exit. A crash report may have been written.\n");

        prev(info);
    }));
}

#[allow(deprecated)]
fn write_crash_report(info: &panic::PanicInfo<'_>) -> std::io::Result<()> {
    let thread = std::thread::current();
    let thread_name = thread.name().unwrap_or("<unnamed>");

    let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_else(|| "<unknown>".to_string());

    let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string-payload>".to_string()
    };

    let backtrace = std::backtrace::Backtrace::capture();
    let state = last_state_cell().lock().map(|g| g.clone()).unwrap_or_default();

    let base_dir = directories_next::ProjectDirs::from("dev", "kuborth", "kuborth")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from(".")));
    let crash_dir = base_dir.join("crash_reports");
    std::fs::create_dir_all(&crash_dir)?;

    let ts = chrono::Utc::now().format("%Y%m%dT%H%M%S").to_string();
    let pid = std::process::id();
    let path = crash_dir.join(format!("panic-{}-{}.log", ts, pid));

    let mut f = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
    writeln!(f, "kuborth panic report")?;
    writeln!(f, "timestamp: {}", ts)?;
    writeln!(f, "pid: {}", pid)?;
    writeln!(f, "thread: {}", thread_name)?;
    writeln!(f, "location: {}", location)?;
    writeln!(f, "payload: {}", payload)?;
    writeln!(f, "--- last known navigation ---")?;
    writeln!(f, "context: {}", state.context)?;
    writeln!(f, "active side: {}", state.side)?;
    writeln!(f, "left panel path: {}", state.left_path)?;
    writeln!(f, "right panel path: {}", state.right_path)?;
    writeln!(f, "--- backtrace ---")?;
    writeln!(f, "{:?}", backtrace)?;
    if let Ok(env) = std::env::var("RUST_LOG") {
        writeln!(f, "RUST_LOG={}", env)?;
    }
    f.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_state_is_readable_back_from_the_same_cell() {
        record_state(LastKnownState { context: "dev".into(), side: "left", left_path: "/namespaces".into(), right_path: "/".into() });
        let state = last_state_cell().lock().unwrap().clone();
        assert_eq!(state.context, "dev");
        assert_eq!(state.side, "left");
    }
}
