// src/infrastructure/terminal.rs
use std::io::{self, BufRead, Write};

use crate::application::Prompter;

/// Read one line from stdin without the trailing newline. `None` on end of input.
pub fn read_line(prompt: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Accepts `y` and `yes` in any case; everything else declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Prompter backed by stdin/stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompter {
    assume_yes: bool,
    wait_on_alert: bool,
}

impl TerminalPrompter {
    /// Prompter for one-shot commands: asks confirmations, prints alerts without waiting
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompter for the shell: alerts block until Enter is pressed
    pub fn interactive() -> Self {
        Self {
            assume_yes: false,
            wait_on_alert: true,
        }
    }

    /// Answer every confirmation with yes without asking
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match read_line(&format!("{} [y/N] ", message)) {
            Ok(Some(answer)) => is_affirmative(&answer),
            _ => false,
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("! {}", message);
        if self.wait_on_alert {
            let _ = read_line("Press Enter to continue...");
        }
    }
}
