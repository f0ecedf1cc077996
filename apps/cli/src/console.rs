//! Terminal output and single-key input.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute};
use std::io::{self, Write};

/// What the study loop needs from a terminal.
pub trait Console {
    /// Clear everything printed so far.
    fn clear(&mut self) -> io::Result<()>;

    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Block until one key is pressed and return it.
    fn read_key(&mut self) -> io::Result<char>;
}

/// Disables raw mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
    }
}

/// The process's own terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn clear(&mut self) -> io::Result<()> {
        execute!(
            io::stdout(),
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()
    }

    fn read_key(&mut self) -> io::Result<char> {
        let _raw = RawModeGuard::enable()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Raw mode swallows SIGINT, so treat Ctrl+C as an interruption.
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
            }
            return Ok(match key.code {
                KeyCode::Char(c) => c,
                KeyCode::Enter => '\n',
                KeyCode::Tab => '\t',
                KeyCode::Esc => '\u{1b}',
                _ => ' ',
            });
        }
    }
}
