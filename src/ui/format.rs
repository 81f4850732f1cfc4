use crate::checker::{CheckStatus, PackageRecord};
use colored::*;
use std::cmp::Ordering;

/// Format a section header
pub fn section_header(title: &str) -> String {
    format!("\n{}\n{}", title.bright_cyan().bold(), "─".repeat(title.chars().count()).bright_black())
}

/// Colour a plain status line according to the outcome it describes
pub fn colorize_status(record: &PackageRecord, line: &str) -> String {
    match &record.status {
        CheckStatus::Compared(Ordering::Equal) => line.normal().to_string(),
        CheckStatus::Compared(Ordering::Less) => line.bright_green().bold().to_string(),
        CheckStatus::Compared(Ordering::Greater) => line.bright_blue().to_string(),
        CheckStatus::NotFound => line.yellow().to_string(),
        CheckStatus::FetchFailed(_) | CheckStatus::CompareFailed(_) => line.red().to_string(),
    }
}
