//! Output renderers and formatting helpers for commands
//!
//! Everything here writes to a caller supplied [`Write`] so commands can be
//! silenced with `--quiet` and inspected in tests.

use std::io::Write;

use clap::ValueEnum;
use rd_api::MessageDocument;
use serde::Serialize;

use crate::errors::CliError;

/// How listing commands render inventory
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Bordered text table. Cells may span several lines.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with a header row, shown upper-cased
    pub fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            headers: headers.into_iter().map(|h| h.as_ref().to_uppercase()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                let width = cell.lines().map(|l| l.chars().count()).max().unwrap_or(0);
                widths[i] = widths[i].max(width);
            }
        }
        widths
    }

    pub fn render(&self, out: &mut dyn Write) -> std::io::Result<()> {
        let widths = self.widths();
        let border: String = widths
            .iter()
            .map(|w| format!("+{}", "-".repeat(w + 2)))
            .collect::<String>()
            + "+";

        writeln!(out, "{}", border)?;
        if !self.headers.is_empty() {
            write_row(out, &self.headers, &widths)?;
            writeln!(out, "{}", border)?;
        }
        for row in &self.rows {
            write_row(out, row, &widths)?;
        }
        writeln!(out, "{}", border)
    }
}

fn write_row(out: &mut dyn Write, row: &[String], widths: &[usize]) -> std::io::Result<()> {
    let cells: Vec<Vec<&str>> = widths
        .iter()
        .enumerate()
        .map(|(i, _)| row.get(i).map(|c| c.lines().collect()).unwrap_or_default())
        .collect();
    let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);

    for line in 0..height {
        let mut text = String::new();
        for (cell, width) in cells.iter().zip(widths) {
            let value = cell.get(line).copied().unwrap_or("");
            let pad = width - value.chars().count();
            text.push_str(&format!("| {}{} ", value, " ".repeat(pad)));
        }
        writeln!(out, "{}|", text)?;
    }
    Ok(())
}

/// Message framed with stars
pub fn banner(out: &mut dyn Write, message: &str) -> std::io::Result<()> {
    let inner = message.chars().count() + 4;
    let edge = "*".repeat(inner + 2);
    let blank = format!("*{}*", " ".repeat(inner));
    writeln!(out)?;
    writeln!(out, "{}", edge)?;
    writeln!(out, "{}", blank)?;
    writeln!(out, "*  {}  *", message)?;
    writeln!(out, "{}", blank)?;
    writeln!(out, "{}", edge)?;
    writeln!(out)
}

/// Label/value table of a message document, with `map` applied to each pair
pub fn render_messages<F>(
    out: &mut dyn Write,
    document: &MessageDocument,
    map: F,
) -> std::io::Result<()>
where
    F: Fn(&str, &str) -> (String, String),
{
    let mut table = Table::new();
    for message in document.messages() {
        let (label, value) = map(&message.label, &message.value);
        table.push_row([label, value]);
    }
    writeln!(out)?;
    table.render(out)?;
    writeln!(out)
}

/// Render a listing either as a table or as JSON
pub fn render_listing<T, F>(
    out: &mut dyn Write,
    format: OutputFormat,
    items: &[T],
    empty_message: &str,
    to_table: F,
) -> Result<(), CliError>
where
    T: Serialize,
    F: FnOnce(&[T]) -> Table,
{
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(items)?;
            writeln!(out, "{}", text)?;
        }
        OutputFormat::Table => {
            writeln!(out)?;
            if items.is_empty() {
                writeln!(out, "{}", empty_message)?;
            } else {
                to_table(items).render(out)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
