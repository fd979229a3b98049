use colored::*;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Console handles all terminal I/O of the interactive commands with colored
/// formatting
pub struct Console {
    accent_color: Color,
    success_color: Color,
    warning_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            accent_color: Color::Cyan,
            success_color: Color::Green,
            warning_color: Color::Yellow,
        }
    }

    /// Print a framed banner
    pub fn print_banner(&self, title: &str, subtitle: &str) {
        println!("{}", "=".repeat(60).color(self.accent_color));
        println!("{}", format!("  {}", title).color(self.accent_color).bold());
        println!("  {}", subtitle);
        println!("{}", "=".repeat(60).color(self.accent_color));
    }

    /// Print a wizard step heading
    pub fn print_step(&self, number: usize, title: &str) {
        println!();
        println!("{} {}", format!("Step {}:", number).bold(), title);
        println!();
    }

    /// Print a bold heading
    pub fn print_heading(&self, text: &str) {
        println!();
        println!("{}", text.bold());
        println!();
    }

    /// Print `label: value` with the value highlighted
    pub fn print_field(&self, label: &str, value: &str) {
        println!("  {}: {}", label, value.color(self.accent_color));
    }

    /// Print a numbered choice
    pub fn print_choice(&self, number: usize, label: &str) {
        println!("  {}. {}", number, label);
    }

    /// Print a file action such as "Created" or "Removed"
    pub fn print_file_action(&self, verb: &str, path: &Path) {
        println!("  {} {}", verb.color(self.success_color), path.display());
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) {
        println!("{}", message.color(self.success_color).bold());
    }

    /// Print a warning
    pub fn print_warning(&self, message: &str) {
        println!("  {}", message.color(self.warning_color));
    }

    /// Print a muted note
    pub fn print_note(&self, message: &str) {
        println!("  {}", message.bright_black());
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Print a separator line
    pub fn print_separator(&self) {
        println!("{}", "-".repeat(60).bright_black());
    }

    /// Print a two-column table
    pub fn print_table(&self, title: &str, rows: &[(&str, String)]) {
        println!();
        print!("{}", format_table(title, rows));
    }

    /// Ask for a value; an empty answer takes `default`
    pub fn prompt(&self, label: &str, default: Option<&str>) -> io::Result<String> {
        match default {
            Some(d) => print!("  {} {}: ", label, format!("[{}]", d).bright_black()),
            None => print!("  {}: ", label),
        }
        io::stdout().flush()?;

        let answer = read_line()?;
        Ok(match default {
            Some(d) if answer.is_empty() => d.to_string(),
            _ => answer,
        })
    }

    /// Ask for a secret without echoing it; an empty answer takes `default`
    pub fn prompt_secret(&self, label: &str, default: Option<&str>) -> io::Result<String> {
        match default {
            Some(_) => print!("  {} {}: ", label, "[hidden default]".bright_black()),
            None => print!("  {}: ", label),
        }
        io::stdout().flush()?;

        let answer = if io::stdin().is_terminal() {
            let _raw = RawMode::enable()?;
            read_secret(std::iter::from_fn(|| Some(event::read())))?
        } else {
            read_line()?
        };
        println!();

        Ok(match default {
            Some(d) if answer.is_empty() => d.to_string(),
            _ => answer,
        })
    }

    /// Ask a yes/no question, repeating until the answer is understood
    pub fn confirm(&self, label: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            print!("  {} {} ", label, hint.bright_black());
            io::stdout().flush()?;

            match parse_confirm(&read_line()?, default) {
                Some(answer) => return Ok(answer),
                None => println!("  {}", "Please answer y or n.".color(self.warning_color)),
            }
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

fn read_line() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Raw terminal mode for the lifetime of the guard; input is not echoed
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Collect typed characters until Enter; Ctrl-C or Esc aborts
fn read_secret<I>(events: I) -> io::Result<String>
where
    I: IntoIterator<Item = io::Result<Event>>,
{
    let mut secret = String::new();
    for event in events {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event?
        else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "input cancelled"));
            }
            KeyCode::Esc => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "input cancelled"));
            }
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
    Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
}

/// Interpret a yes/no answer; `None` when it is neither
pub fn parse_confirm(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Render a property/value table with a title line
pub fn format_table(title: &str, rows: &[(&str, String)]) -> String {
    let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0).max(8);
    let value_width = rows
        .iter()
        .map(|(_, v)| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);
    let rule = format!("+{}+{}+\n", "-".repeat(key_width + 2), "-".repeat(value_width + 2));

    let mut out = format!("{}\n", title);
    out.push_str(&rule);
    out.push_str(&format!(
        "| {:<kw$} | {:<vw$} |\n",
        "Property",
        "Value",
        kw = key_width,
        vw = value_width
    ));
    out.push_str(&rule);
    for (key, value) in rows {
        out.push_str(&format!(
            "| {:<kw$} | {:<vw$} |\n",
            key,
            value,
            kw = key_width,
            vw = value_width
        ));
    }
    out.push_str(&rule);
    out
}
