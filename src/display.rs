//! Console reporting for the assistant
//!
//! Every progress line, warning and failure goes through [`Reporter`], which
//! colors the prefix and filters by verbosity.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::cli::Verbosity;

/// Verbosity-aware console reporter
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    verbosity: Verbosity,
    tick_interval: Duration,
}

impl Reporter {
    /// Create reporter for the given verbosity
    pub fn new(verbosity: Verbosity) -> Self {
        Reporter {
            verbosity,
            tick_interval: Duration::from_millis(100),
        }
    }

    /// Reporter that prints errors and warnings only
    pub fn quiet() -> Self {
        Self::new(Verbosity::Quiet)
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, model: &str) {
        if !self.verbosity.show_progress() {
            return;
        }
        let width = 64;
        let rule = "=".repeat(width);
        let title = format!("  Healthcare Diagnosis Assistant {}", version);
        let info = format!("  Model: {}", model);

        println!("\n{}", rule.cyan());
        println!("{}", title.bold().cyan());
        println!("{}", info.dimmed());
        println!("{}\n", rule.cyan());
    }

    /// Progress line
    pub fn info(&self, message: &str) {
        if self.verbosity.show_progress() {
            println!("{} {}", "Info:".cyan(), message);
        }
    }

    /// Completed step
    pub fn success(&self, message: &str) {
        if self.verbosity.show_progress() {
            println!("{} {}", "✓".green(), message);
        }
    }

    /// Non-fatal problem, always shown
    pub fn warning(&self, message: &str) {
        println!("{} {}", "Warning:".yellow().bold(), message.yellow());
    }

    /// Fatal problem, always shown
    pub fn error(&self, message: &str) {
        println!("{} {}", "Error:".red().bold(), message.red());
    }

    /// Query text, raw rows and similar detail
    pub fn debug(&self, message: &str) {
        if self.verbosity.show_queries() {
            println!("{} {}", "Debug:".dimmed(), message.dimmed());
        }
    }

    /// HTTP-level detail
    pub fn trace(&self, message: &str) {
        if self.verbosity.show_wire() {
            println!("{} {}", "Trace:".dimmed(), message.dimmed());
        }
    }

    /// Spinner shown while a remote call is in flight
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if !self.verbosity.show_progress() {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(self.tick_interval);
        pb
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}
