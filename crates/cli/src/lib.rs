//! # SchemaForge CLI
//!
//! Command-line interface for SchemaForge.
//!
//! ## Commands
//!
//! - `generate` - Compile a diagram into migrations and enum classes
//! - `validate` - Check a diagram without generating anything
//! - `info` - Display the tables, foreign keys and enumerations of a diagram
//!

pub mod cli;
pub mod commands;
pub mod console;

use std::process::ExitCode;

use colored::Colorize;

pub use cli::{Cli, Commands, DiagramArgs, GenerateArgs};
pub use console::ConsoleNotifier;

// Re-export dependencies for use in main.rs
pub use schemaforge_codegen;
pub use schemaforge_core;
pub use schemaforge_ir;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did its work
    Success,
    /// The diagram could not be compiled; the reason has been reported
    Aborted,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Aborted => ExitCode::FAILURE,
        }
    }
}

/// Execute a parsed command line
pub fn execute(cli: Cli) -> anyhow::Result<Outcome> {
    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}

/// Execute a parsed command line and report failures on stderr
pub fn run(cli: Cli) -> ExitCode {
    match execute(cli) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    const DIAGRAM: &str = r#"{
        "name": "Shop",
        "views": [
            { "model": { "kind": "class", "id": "o1", "name": "Order", "classification": "Table",
                "attributes": [
                    { "name": "id", "type": "bigIncrements", "isID": true },
                    { "name": "customer_id", "type": "unsignedBigInteger" }
                ],
                "ownedElements": [
                    { "kind": "association", "id": "a1",
                      "end1": { "name": "customer_id", "reference": "o1" },
                      "end2": { "name": "id", "reference": "c1" } }
                ] } },
            { "model": { "kind": "class", "id": "c1", "name": "Customer", "classification": "table",
                "attributes": [ { "name": "id", "type": "bigIncrements", "isID": true } ] } }
        ]
    }"#;

    fn write_diagram(dir: &TempDir, content: &str) -> String {
        let path = dir.path().join("shop.json");
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn execute_args(args: &[&str]) -> anyhow::Result<Outcome> {
        execute(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_generate_writes_migrations() {
        let dir = TempDir::new().unwrap();
        let diagram = write_diagram(&dir, DIAGRAM);
        let out = dir.path().join("out");
        let out_str = out.to_string_lossy().into_owned();

        let outcome = execute_args(&[
            "schemaforge",
            "generate",
            diagram.as_str(),
            "-o",
            out_str.as_str(),
            "--timestamp",
            "2024-05-01T09:30:00",
        ])
        .unwrap();

        assert_eq!(outcome, Outcome::Success);
        assert!(out.join("2024_05_01_093000_create_customer_table.php").exists());
        assert!(out.join("2024_05_01_093001_create_order_table.php").exists());
        assert!(!out.join("Enums").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let diagram = write_diagram(&dir, DIAGRAM);
        let out = dir.path().join("out");
        let out_str = out.to_string_lossy().into_owned();

        let outcome =
            execute_args(&["schemaforge", "generate", diagram.as_str(), "-o", out_str.as_str(), "--dry-run"]).unwrap();

        assert_eq!(outcome, Outcome::Success);
        assert!(!out.exists());
    }

    #[test]
    fn test_generate_without_tables_aborts() {
        let dir = TempDir::new().unwrap();
        let diagram = write_diagram(&dir, r#"{ "name": "Empty", "views": [] }"#);
        let out = dir.path().join("out");
        let out_str = out.to_string_lossy().into_owned();

        let outcome = execute_args(&["schemaforge", "generate", diagram.as_str(), "-o", out_str.as_str()]).unwrap();

        assert_eq!(outcome, Outcome::Aborted);
        assert!(!out.exists());
    }

    #[test]
    fn test_validate_and_info() {
        let dir = TempDir::new().unwrap();
        let diagram = write_diagram(&dir, DIAGRAM);
        assert_eq!(execute_args(&["schemaforge", "validate", diagram.as_str()]).unwrap(), Outcome::Success);
        assert_eq!(execute_args(&["schemaforge", "info", diagram.as_str()]).unwrap(), Outcome::Success);
    }

    #[test]
    fn test_unreadable_diagram_is_an_error() {
        let dir = TempDir::new().unwrap();
        let diagram = write_diagram(&dir, "{ not json");
        assert!(execute_args(&["schemaforge", "validate", diagram.as_str()]).is_err());
    }
}
