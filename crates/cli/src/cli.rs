//! Command-line definitions

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Accepted layouts of `--timestamp`
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

#[derive(Debug, Parser)]
#[command(author, version, about = "Compile ER diagrams into Laravel migrations and enum classes")]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate migrations and enum classes from a diagram
    Generate(GenerateArgs),
    /// Check a diagram without generating anything
    Validate(DiagramArgs),
    /// Show the tables, foreign keys and enumerations of a diagram
    Info(DiagramArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Diagram document (JSON)
    pub diagram: PathBuf,

    /// Output directory (overrides the configuration file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Generator configuration file (TOML)
    #[arg(short, long, env = "SCHEMAFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fixed base time for migration file names (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_parser = parse_timestamp)]
    pub timestamp: Option<NaiveDateTime>,

    /// Skip enum class generation
    #[arg(long)]
    pub no_enums: bool,

    /// List the files that would be generated without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct DiagramArgs {
    /// Diagram document (JSON)
    pub diagram: PathBuf,
}

fn parse_timestamp(text: &str) -> Result<NaiveDateTime, String> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or_else(|| format!("'{text}' is not a timestamp like 2024-05-01T09:30:00"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "schemaforge",
            "-vv",
            "generate",
            "shop.json",
            "-o",
            "out",
            "--timestamp",
            "2024-05-01T09:30:00",
            "--no-enums",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.diagram, PathBuf::from("shop.json"));
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert_eq!(
            args.timestamp.unwrap().format("%H:%M:%S").to_string(),
            "09:30:00"
        );
        assert!(args.no_enums);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let result = Cli::try_parse_from(["schemaforge", "generate", "d.json", "--timestamp", "yesterday"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_timestamp_with_space() {
        assert!(parse_timestamp("2024-05-01 09:30:00").is_ok());
    }

    #[test]
    fn test_parse_validate_and_info() {
        let cli = Cli::try_parse_from(["schemaforge", "validate", "d.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate(_)));

        let cli = Cli::try_parse_from(["schemaforge", "info", "d.json", "--verbose"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Info(_)));
    }
}
