//! RAII terminal setup/teardown (§5 "The event loop"), plus the two
//! suspend/resume pairs the runner needs when it hands the terminal to a
//! foreground child: `kubectl edit` (launched from the event loop) and the
//! embedded shell's full-screen presentation.

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::queue;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fmt;
use std::io;
use std::io::Stdout;
use std::io::Write;
use std::ops::{Deref, DerefMut};

#[derive(Debug)]
pub enum TerminalError {
    Io(io::Error),
    Other(String),
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalError::Io(e) => write!(f, "IO error: {}", e),
            TerminalError::Other(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for TerminalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerminalError::Io(e) => Some(e),
            TerminalError::Other(_) => None,
        }
    }
}

impl From<io::Error> for TerminalError {
    fn from(e: io::Error) -> Self {
        TerminalError::Io(e)
    }
}

impl From<anyhow::Error> for TerminalError {
    fn from(e: anyhow::Error) -> Self {
        TerminalError::Other(format!("error: {}", e))
    }
}

/// RAII wrapper that restores the terminal (leave alternate screen, drop
/// mouse capture, disable raw mode, show the cursor) when dropped, so a
/// panic unwinding through the event loop can't leave the user's shell in
/// raw/alternate-screen mode.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl Deref for TerminalGuard {
    type Target = Terminal<CrosstermBackend<Stdout>>;
    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl TerminalGuard {
    pub fn new() -> Result<Self, TerminalError> {
        let mut stdout = io::stdout();
        queue!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide).map_err(TerminalError::from)?;
        stdout.flush().map_err(TerminalError::from)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(TerminalError::from)?;
        // Raw mode only after `Terminal::new` succeeds, so a construction
        // failure never leaves the terminal stuck in raw mode.
        enable_raw_mode().map_err(TerminalError::from)?;
        Ok(TerminalGuard { terminal, restored: false })
    }

    /// Consume the guard and restore the terminal, surfacing any IO error
    /// (a plain `Drop` can't — see `Drop::drop` below for the silent path).
    pub fn restore(mut self) -> Result<(), TerminalError> {
        if self.restored {
            return Ok(());
        }
        disable_raw_mode().map_err(TerminalError::from)?;
        leave_screen(self.terminal.backend_mut()).map_err(TerminalError::from)?;
        self.terminal.show_cursor().map_err(TerminalError::from)?;
        self.restored = true;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        let _ = disable_raw_mode();
        let _ = leave_screen(self.terminal.backend_mut());
        let _ = self.terminal.show_cursor();
        self.restored = true;
    }
}

/// The queued leave-alternate-screen/disable-mouse/show-cursor sequence
/// shared by `restore`, `Drop`, and `force_restore`.
fn leave_screen(w: &mut impl Write) -> io::Result<()> {
    queue!(w, DisableMouseCapture, LeaveAlternateScreen, Show)?;
    w.flush()
}

pub fn init_terminal() -> Result<TerminalGuard, TerminalError> {
    TerminalGuard::new()
}

pub fn enable_mouse_capture_on_terminal(terminal: &mut TerminalGuard) -> Result<(), TerminalError> {
    queue!(terminal.backend_mut(), EnableMouseCapture).map_err(TerminalError::from)?;
    terminal.backend_mut().flush().map_err(TerminalError::from)?;
    Ok(())
}

pub fn disable_mouse_capture_on_terminal(terminal: &mut TerminalGuard) -> Result<(), TerminalError> {
    queue!(terminal.backend_mut(), DisableMouseCapture).map_err(TerminalError::from)?;
    terminal.backend_mut().flush().map_err(TerminalError::from)?;
    Ok(())
}

pub fn restore_terminal(terminal: TerminalGuard) -> Result<(), TerminalError> {
    terminal.restore()
}

/// Leave the alternate screen and drop raw mode so a foreground child
/// (`kubectl edit`'s editor, or the shell in full-screen presentation) gets
/// a normal terminal. Pair with `resume_terminal_for_subprocess`.
pub fn suspend_terminal_for_subprocess(terminal: &mut TerminalGuard) -> Result<(), TerminalError> {
    queue!(terminal.backend_mut(), LeaveAlternateScreen, Show).map_err(TerminalError::from)?;
    terminal.backend_mut().flush().map_err(TerminalError::from)?;
    disable_raw_mode().map_err(TerminalError::from)?;
    Ok(())
}

/// Reverse of `suspend_terminal_for_subprocess`, once the child has exited.
pub fn resume_terminal_for_subprocess(terminal: &mut TerminalGuard) -> Result<(), TerminalError> {
    enable_raw_mode().map_err(TerminalError::from)?;
    queue!(terminal.backend_mut(), EnterAlternateScreen, Hide).map_err(TerminalError::from)?;
    terminal.backend_mut().flush().map_err(TerminalError::from)?;
    Ok(())
}

/// Best-effort restore with no `TerminalGuard` to hand — the one path the
/// panic hook can take, since unwinding may have already dropped the
/// frame that owned the real guard.
pub fn force_restore() {
    let _ = disable_raw_mode();
    let _ = leave_screen(&mut io::stdout());
    let _ = crossterm::execute!(io::stdout(), crossterm::cursor::Show);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_restore_is_idempotent() {
        force_restore();
        force_restore();
    }
}
