//! Line input for the menus.
//!
//! On a terminal, keys are read in raw mode so Ctrl+C arrives as a key
//! rather than a signal, and a read gives up after a short idle timeout so the
//! menu loop can check on playback between keystrokes. Piped input falls back
//! to plain buffered lines.

use std::io::{self, BufRead, Write};
use std::mem;
use std::time::{Duration, Instant};

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;

/// One result of waiting on the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line was submitted with Enter.
    Line(String),
    /// Nothing was submitted before the idle timeout. Typed characters are
    /// kept for the next read.
    Idle,
    /// Ctrl+C.
    Interrupted,
    /// Ctrl+D on an empty line, or end of input.
    Closed,
}

pub trait Prompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Input>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn read_line(&mut self, prompt: &str) -> io::Result<Input> {
        (**self).read_line(prompt)
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Interactive prompt on the controlling terminal.
pub struct TerminalPrompt {
    pending: String,
    idle: Duration,
}

impl TerminalPrompt {
    pub fn new(idle: Duration) -> Self {
        Self {
            pending: String::new(),
            idle,
        }
    }

    pub(super) fn redraw(&self, out: &mut impl Write, prompt: &str) -> io::Result<()> {
        queue!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(prompt),
            Print(&self.pending)
        )?;
        out.flush()
    }

    /// Apply one key press; returns the finished input, if any.
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Option<Input> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.pending.clear();
                Some(Input::Interrupted)
            }
            KeyCode::Char('d') if ctrl && self.pending.is_empty() => Some(Input::Closed),
            KeyCode::Enter => Some(Input::Line(mem::take(&mut self.pending))),
            KeyCode::Backspace => {
                self.pending.pop();
                None
            }
            KeyCode::Esc => {
                self.pending.clear();
                None
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.pending.push(c);
                None
            }
            _ => None,
        }
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Input> {
        let mut out = io::stdout();
        let _raw = RawModeGuard::enable()?;
        self.redraw(&mut out, prompt)?;

        let deadline = Instant::now() + self.idle;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(Input::Idle);
            }

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match self.handle_key(key) {
                Some(input) => {
                    queue!(out, Print("\r\n"))?;
                    out.flush()?;
                    return Ok(input);
                }
                None => self.redraw(&mut out, prompt)?,
            }
        }
    }
}

/// Prompt over any buffered reader, for piped stdin.
///
/// Blocks until a full line arrives, so it never reports `Idle`.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Input> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(Input::Closed);
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        Ok(Input::Line(line))
    }
}
