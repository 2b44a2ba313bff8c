//! Terminal prompting for secret values.
//!
//! Values are read with echo replaced by `*` while the terminal is in raw
//! mode. When stdin is not a terminal (piped input, CI) one line is read per
//! secret instead.
use colored::*;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::secrets::SecretDefinition;

/// Trait representing an event source (so tests can inject fake events).
pub trait EventSource {
    fn read_event(&mut self) -> anyhow::Result<Event>;
}

/// Prompt for the value of `definition` on the controlling terminal.
///
/// Returns the raw input; an empty string means the user chose to skip.
pub fn prompt_secret(definition: &SecretDefinition) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", format_label(definition))?;
    stdout.flush()?;

    if !io::stdin().is_terminal() {
        let stdin = io::stdin();
        let value = read_line_from(&mut stdin.lock())?;
        writeln!(stdout)?;
        return Ok(value);
    }

    // Real event source that delegates to `crossterm::event::read`
    struct CrosstermEventSource;
    impl EventSource for CrosstermEventSource {
        fn read_event(&mut self) -> anyhow::Result<Event> {
            Ok(event::read()?)
        }
    }

    terminal::enable_raw_mode()?;
    let mut events = CrosstermEventSource;
    let res = read_masked_with(&mut events, &mut stdout);

    // Restore terminal in all cases
    terminal::disable_raw_mode()?;
    writeln!(stdout)?;

    res
}

/// The prompt shown before reading a value.
pub fn format_label(definition: &SecretDefinition) -> String {
    let requirement = if definition.required {
        "required".yellow()
    } else {
        "optional, Enter to skip".dimmed()
    };
    format!(
        "{} {} ({})\n  {}: ",
        definition.name.bright_cyan().bold(),
        format!("[{}]", requirement),
        definition.description,
        "Value".cyan()
    )
}

/// Read a masked line from `events`, echoing `*` per character to `out`.
///
/// Enter finishes, Esc returns an empty value (skip), Ctrl+C aborts.
pub fn read_masked_with<E: EventSource, W: Write>(
    events: &mut E,
    out: &mut W,
) -> anyhow::Result<String> {
    let mut value = String::new();

    loop {
        let Event::Key(key) = events.read_event()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            anyhow::bail!("Input cancelled");
        }

        match key.code {
            KeyCode::Enter => return Ok(value),
            KeyCode::Esc => return Ok(String::new()),
            KeyCode::Backspace => {
                if value.pop().is_some() {
                    write!(out, "\u{8} \u{8}")?;
                    out.flush()?;
                }
            }
            KeyCode::Char(c) => {
                value.push(c);
                write!(out, "*")?;
                out.flush()?;
            }
            _ => {}
        }
    }
}

/// Read one line from `reader`, without the trailing newline. EOF yields an
/// empty value.
pub fn read_line_from<R: BufRead>(reader: &mut R) -> anyhow::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
