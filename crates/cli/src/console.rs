//! Coloured console output

use colored::Colorize;
use schemaforge_core::Notifier;

/// Notifier printing to the terminal: info on stdout, errors on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }
}

/// Print a warning line to stderr
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Print a section heading
pub fn heading(title: &str) {
    println!("{}", title.bold().underline());
}
