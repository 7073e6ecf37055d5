//! Terminal rendering of a `ListDisplay` and the delete prompt.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use todo_core::{Confirm, ListDisplay, Row, TodoId};

pub struct ConsoleRenderer {
    json_mode: bool,
    styled: bool,
}

impl ConsoleRenderer {
    pub fn new(json_mode: bool, styled: bool) -> Self {
        Self { json_mode, styled }
    }

    pub fn print(&self, display: &ListDisplay) -> anyhow::Result<()> {
        self.write_to(&mut io::stdout().lock(), display)
    }

    fn write_to(&self, out: &mut impl Write, display: &ListDisplay) -> anyhow::Result<()> {
        if self.json_mode {
            writeln!(out, "{}", serde_json::to_string_pretty(display)?)?;
        } else {
            write_display(out, display, self.styled)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Filter bar on the first line, then one line per row.
pub fn write_display(out: &mut impl Write, display: &ListDisplay, styled: bool) -> io::Result<()> {
    let controls: Vec<String> = display
        .controls
        .iter()
        .map(|control| {
            let label = control.kind.as_str();
            match (control.active, styled) {
                (true, true) => format!("[{}]", label.bold()),
                (true, false) => format!("[{label}]"),
                (false, _) => format!(" {label} "),
            }
        })
        .collect();
    writeln!(out, "{}", controls.join(" "))?;

    for row in &display.rows {
        match row {
            Row::Placeholder { text } => {
                writeln!(out, "  {text}")?;
            }
            Row::Item(item) => {
                let mark = if item.struck_through { "x" } else { " " };
                let title = if !styled {
                    item.title.clone()
                } else if item.struck_through {
                    item.title.strikethrough().dimmed().to_string()
                } else {
                    item.title.bold().to_string()
                };
                writeln!(out, "{:>4} [{mark}] {title}", item.id)?;
                if !item.description.is_empty() {
                    writeln!(out, "         {}", item.description)?;
                }
            }
        }
    }
    Ok(())
}

/// Reads a yes/no answer from stdin; anything but `y`/`yes` declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm_delete(&mut self, id: TodoId) -> bool {
        eprint!("Delete todo {id}? [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
