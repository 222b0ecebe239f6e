//! Terminal output formatting and utilities.
//!
//! This module provides consistent output formatting across all commands,
//! including colors, error messages and the HTML document used for docs.

pub mod colors;
pub mod errors;
pub mod html;

use jsr_core::types::{Package, ScoreBand};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Handler that never emits escape codes
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            colors: colors::ColorSupport::disabled(),
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.colors.red("✗"), message);
    }

    /// Print a section title
    pub fn header(&self, title: &str) {
        println!("{}", self.colors.bold(title));
    }

    /// Print a `label: value` line
    pub fn field(&self, label: &str, value: &str) {
        println!("  {} {}", self.colors.dim(&format!("{}:", label)), value);
    }

    /// Print a list item
    pub fn item(&self, text: &str) {
        println!("  • {}", text);
    }

    /// Print a pass/fail line
    pub fn check(&self, label: &str, passed: bool) {
        let mark = if passed {
            self.colors.green("✓")
        } else {
            self.colors.red("✗")
        };
        println!("  {} {}", mark, label);
    }

    /// Print a package summary: name, score, description and runtime badges
    pub fn package_card(&self, package: &Package) {
        let mut title = self.colors.cyan(&package.reference().to_string());
        if let (Some(score), Some(band)) = (package.score, package.score_band()) {
            title.push_str("  ");
            title.push_str(&self.score(&format!("{}%", score), band));
        }
        println!("{}", title);

        if !package.description.is_empty() {
            println!("  {}", package.description);
        }

        let badges = package.runtime_badges();
        if !badges.is_empty() {
            println!("  {}", self.colors.dim(&badges.join(" · ")));
        }
    }

    /// Color `text` by score band
    pub fn score(&self, text: &str, band: ScoreBand) -> String {
        match band {
            ScoreBand::Low => self.colors.red(text),
            ScoreBand::Medium => self.colors.yellow(text),
            ScoreBand::High => self.colors.green(text),
        }
    }

    /// Print a document verbatim to stdout
    pub fn document(&self, content: &str) {
        println!("{}", content);
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
