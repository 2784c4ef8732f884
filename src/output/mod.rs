//! Console output formatting with terminal color support

use colored::*;
use std::fmt::Write as _;

/// Status of a single validation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

impl CheckStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        }
    }

    fn color(&self) -> Color {
        match self {
            CheckStatus::Pass => Color::Green,
            CheckStatus::Warn => Color::Yellow,
            CheckStatus::Fail => Color::Red,
        }
    }
}

/// Console writer shared by the analysis subcommands
#[derive(Debug, Clone)]
pub struct ConsoleOutput {
    use_color: bool,
}

impl ConsoleOutput {
    pub fn new(use_color: bool) -> Self {
        // colored checks this global on every call, set it once up front
        colored::control::set_override(use_color);
        Self { use_color }
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Section header with an underline, matching the report text layout
    pub fn header(&self, title: &str) -> String {
        let underline = "=".repeat(title.chars().count());
        if self.use_color {
            format!("{}\n{}", title.bold(), underline)
        } else {
            format!("{}\n{}", title, underline)
        }
    }

    /// Smaller sub-section header
    pub fn subheader(&self, title: &str) -> String {
        let underline = "-".repeat(title.chars().count());
        format!("{}\n{}", title, underline)
    }

    /// One validation check line, e.g. "[PASS] transfer size plausible"
    pub fn check_line(&self, status: CheckStatus, message: &str) -> String {
        let label = if self.use_color {
            status.label().color(status.color()).bold().to_string()
        } else {
            status.label().to_string()
        };
        format!("[{}] {}", label, message)
    }

    /// Aligned key-value listing
    pub fn key_values(&self, pairs: &[(&str, String)]) -> String {
        let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        for (key, value) in pairs {
            let _ = writeln!(out, "  {:<width$}  {}", key, value, width = width);
        }
        out
    }

    /// Plain text table with a header row and column alignment
    pub fn table(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        let header_line = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", header_line.trim_end());
        let _ = writeln!(
            out,
            "{}",
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  ")
        );
        for row in rows {
            let line = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let width = widths.get(i).copied().unwrap_or(0);
                    format!("{:<width$}", cell, width = width)
                })
                .collect::<Vec<_>>()
                .join("  ");
            let _ = writeln!(out, "{}", line.trim_end());
        }
        out
    }

    /// Emphasized summary line
    pub fn emphasize(&self, text: &str) -> String {
        if self.use_color {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }
}
