//! The Embedded Shell Adapter (§4.6 "ShellAdapter"): a line-oriented PTY
//! with two presentation modes plus typed-input tracking used by the
//! router to decide whether a key goes to a panel or to the shell.

/// A live pseudoterminal-backed shell. The default `ProcessShellAdapter`
/// documents the limitation it carries: a real PTY (raw mode, resize,
/// child process group) is out of scope for this crate (§1 Non-goals —
/// "the pseudoterminal emulator for the embedded shell" is an external
/// collaborator), so it shells out per line instead of attaching a true
/// terminal.
pub trait ShellAdapter: Send {
    fn has_input(&self) -> bool;
    fn clear_typed(&mut self);
    fn type_char(&mut self, c: char);
    fn backspace(&mut self);
    fn submit(&mut self) -> Option<String>;
    fn last_lines(&self, n: usize) -> Vec<String>;
    fn focus(&mut self);
    fn blur(&mut self);
    /// Append output lines once a submitted command's background thunk
    /// completes (the shell itself never blocks the event loop on exec).
    fn record_output(&mut self, lines: Vec<String>);
}

pub struct ProcessShellAdapter {
    typed: String,
    history: Vec<String>,
    focused: bool,
}

impl Default for ProcessShellAdapter {
    fn default() -> Self {
        ProcessShellAdapter { typed: String::new(), history: Vec::new(), focused: false }
    }
}

impl ShellAdapter for ProcessShellAdapter {
    fn has_input(&self) -> bool {
        !self.typed.is_empty()
    }

    fn clear_typed(&mut self) {
        self.typed.clear();
    }

    fn type_char(&mut self, c: char) {
        self.typed.push(c);
    }

    fn backspace(&mut self) {
        self.typed.pop();
    }

    fn submit(&mut self) -> Option<String> {
        if self.typed.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.typed);
        self.history.push(format!("$ {}", line));
        Some(line)
    }

    fn last_lines(&self, n: usize) -> Vec<String> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn record_output(&mut self, lines: Vec<String>) {
        self.history.extend(lines);
    }
}

/// Whether the shell is shown as a two-line compact strip or occupies the
/// whole screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShellPresentation {
    #[default]
    Compact,
    FullScreen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_input_round_trips_through_submit() {
        let mut shell = ProcessShellAdapter::default();
        assert!(!shell.has_input());
        shell.type_char('l');
        shell.type_char('s');
        assert!(shell.has_input());
        let cmd = shell.submit();
        assert_eq!(cmd.as_deref(), Some("ls"));
        assert!(!shell.has_input());
    }

    #[test]
    fn clear_typed_drops_unsent_input() {
        let mut shell = ProcessShellAdapter::default();
        shell.type_char('x');
        shell.clear_typed();
        assert!(!shell.has_input());
    }

    #[test]
    fn recorded_output_appears_in_last_lines() {
        let mut shell = ProcessShellAdapter::default();
        shell.record_output(vec!["hello".to_string(), "world".to_string()]);
        assert_eq!(shell.last_lines(2), vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn history_keeps_last_n_lines() {
        let mut shell = ProcessShellAdapter::default();
        for cmd in ["a", "b", "c"] {
            for c in cmd.chars() {
                shell.type_char(c);
            }
            shell.submit();
        }
        assert_eq!(shell.last_lines(2), vec!["$ b".to_string(), "$ c".to_string()]);
    }
}
