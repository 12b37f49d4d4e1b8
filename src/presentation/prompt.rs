//! Hidden password entry.

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use zeroize::Zeroizing;

/// Outcome of feeding one key to [`SecretInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Submit,
    Cancel,
}

/// Line editor that never echoes what it collects.
#[derive(Default)]
pub struct SecretInput {
    buffer: Zeroizing<String>,
}

impl SecretInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Continue;
        }
        match key.code {
            KeyCode::Enter => KeyOutcome::Submit,
            KeyCode::Esc => KeyOutcome::Cancel,
            KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyOutcome::Cancel
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.clear();
                KeyOutcome::Continue
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                KeyOutcome::Continue
            }
            KeyCode::Char(c) => {
                self.buffer.push(c);
                KeyOutcome::Continue
            }
            _ => KeyOutcome::Continue,
        }
    }

    #[must_use]
    pub fn into_secret(self) -> Zeroizing<String> {
        self.buffer
    }
}

/// Asks for a secret on the terminal. Returns `None` when the user cancels.
///
/// When stdin is not a terminal one line is read from it instead.
///
/// # Errors
/// Returns IO error if the terminal cannot be read.
pub fn read_secret(prompt: &str) -> io::Result<Option<Zeroizing<String>>> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    if !io::stdin().is_terminal() {
        let mut line = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut line)?;
        writeln!(stderr)?;
        let trimmed = Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_string());
        return Ok(Some(trimmed));
    }

    terminal::enable_raw_mode()?;
    let outcome = collect_keys();
    terminal::disable_raw_mode()?;
    writeln!(stderr)?;

    outcome
}

fn collect_keys() -> io::Result<Option<Zeroizing<String>>> {
    let mut input = SecretInput::new();
    loop {
        if let Event::Key(key) = event::read()? {
            match input.handle_key(&key) {
                KeyOutcome::Continue => {}
                KeyOutcome::Submit => return Ok(Some(input.into_secret())),
                KeyOutcome::Cancel => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = SecretInput::new();
        for c in "secrex".chars() {
            input.handle_key(&key(KeyCode::Char(c)));
        }
        input.handle_key(&key(KeyCode::Backspace));
        input.handle_key(&key(KeyCode::Char('t')));

        assert_eq!(input.handle_key(&key(KeyCode::Enter)), KeyOutcome::Submit);
        assert_eq!(input.into_secret().as_str(), "secret");
    }

    #[test]
    fn test_ctrl_c_cancels() {
        let mut input = SecretInput::new();
        let outcome = input.handle_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(outcome, KeyOutcome::Cancel);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = SecretInput::new();
        input.handle_key(&key(KeyCode::Char('a')));
        input.handle_key(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(input.into_secret().is_empty());
    }
}
