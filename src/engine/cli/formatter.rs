//! CLI Output Formatting Module
//! Provides consistent, colorized output for terminal UX

use colored::Colorize;
use std::fmt::Display;

pub struct CliFormatter;

impl CliFormatter {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue().bold(), message);
    }

    /// Print a section header
    pub fn header(title: &str) {
        println!("\n{}", title.bright_cyan().bold());
        println!("{}", "─".repeat(title.chars().count()).bright_black());
    }

    /// Print a key-value pair
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", key.bright_white().bold(), value);
    }

    /// Print an admit/deny verdict
    pub fn verdict(admitted: bool, detail: &str) {
        if admitted {
            Self::success(&format!("{} ({})", "ADMIT".green().bold(), detail));
        } else {
            Self::error(&format!("{}", "DENY".red().bold()));
        }
    }

    /// Print a table header
    pub fn table_header(columns: &[&str]) {
        let header = columns
            .iter()
            .map(|c| c.bright_white().bold().to_string())
            .collect::<Vec<_>>()
            .join(" │ ");
        println!("  {}", header);
        println!("  {}", "─".repeat(columns.iter().map(|c| c.len() + 3).sum()).bright_black());
    }

    /// Print a table row
    pub fn table_row(values: &[&str]) {
        println!("  {}", values.join(" │ "));
    }

    /// Print an empty line
    pub fn blank() {
        println!();
    }
}

/// Render an optional allow-list; `None` is shown as a dash
pub fn format_list<T: Display, I: IntoIterator<Item = T>>(items: Option<I>) -> String {
    match items {
        None => "-".to_string(),
        Some(items) => {
            let joined = items
                .into_iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if joined.is_empty() {
                "(none)".to_string()
            } else {
                joined
            }
        }
    }
}
