//! Terminal rendering of tables, badges and toasts.

use std::io::{self, IsTerminal, Write};

use chrono::NaiveDate;
use crossterm::style::{Color, Stylize};
use unicode_width::UnicodeWidthStr;

use crate::domain::toast::{Toast, ToastLevel};
use crate::infrastructure::config::OutputConfig;

const COLUMN_GAP: usize = 2;

/// Where command results are printed.
#[derive(Debug, Clone)]
pub struct Output {
    color: bool,
    date_format: String,
}

impl Output {
    /// Colour is only used when enabled and stdout is a terminal.
    #[must_use]
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            color: config.color && io::stdout().is_terminal(),
            date_format: config.date_format.clone(),
        }
    }

    #[must_use]
    pub fn plain() -> Self {
        Self {
            color: false,
            date_format: OutputConfig::default().date_format,
        }
    }

    #[must_use]
    pub fn date(&self, date: Option<NaiveDate>) -> String {
        date.map_or_else(|| "-".to_string(), |d| d.format(&self.date_format).to_string())
    }

    /// Renders `label` in the badge colour given as `#RRGGBB`.
    #[must_use]
    pub fn badge(&self, label: &str, hex: &str) -> String {
        match (self.color, parse_hex(hex)) {
            (true, Some(color)) => label.with(color).bold().to_string(),
            _ => label.to_string(),
        }
    }

    pub fn line(&self, text: impl AsRef<str>) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", text.as_ref());
    }

    /// Prints `label: value` lines with the values aligned.
    pub fn fields(&self, pairs: &[(&str, String)]) {
        let width = pairs.iter().map(|(label, _)| label.width()).max().unwrap_or(0);
        for (label, value) in pairs {
            let pad = width - label.width();
            self.line(format!("{label}:{} {value}", " ".repeat(pad)));
        }
    }

    pub fn table(&self, table: &Table) {
        if table.is_empty() {
            self.line("Nothing to show.");
        } else {
            self.line(table.render());
        }
    }

    /// Prints a toast; errors go to stderr.
    pub fn toast(&self, toast: &Toast) {
        let (prefix, color) = match toast.level {
            ToastLevel::Success => ("✓", Color::Green),
            ToastLevel::Info => ("•", Color::Cyan),
            ToastLevel::Error => ("✗", Color::Red),
        };
        let text = format!("{prefix} {}", toast.message);
        let text = if self.color {
            text.with(color).to_string()
        } else {
            text
        };

        if toast.level == ToastLevel::Error {
            let _ = writeln!(io::stderr().lock(), "{text}");
        } else {
            self.line(text);
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Column-aligned text table. Widths are measured in terminal cells, and
/// ANSI escapes inside cells are not counted.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn render(&self) -> String {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let mut widths = vec![0; columns];
        for line in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in line.iter().enumerate() {
                widths[i] = widths[i].max(visible_width(cell));
            }
        }

        let mut out = String::new();
        for (n, line) in std::iter::once(&self.headers).chain(&self.rows).enumerate() {
            if n > 0 {
                out.push('\n');
            }
            let mut rendered = String::new();
            for (i, cell) in line.iter().enumerate() {
                rendered.push_str(cell);
                if i + 1 < line.len() {
                    let pad = widths[i] - visible_width(cell) + COLUMN_GAP;
                    rendered.extend(std::iter::repeat_n(' ', pad));
                }
            }
            out.push_str(rendered.trim_end());
        }
        out
    }
}

fn visible_width(cell: &str) -> usize {
    let mut plain = String::with_capacity(cell.len());
    let mut chars = cell.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain.width()
}
