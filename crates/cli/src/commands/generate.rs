//! `schemaforge generate`

use anyhow::{Context, Result};
use schemaforge_codegen::{GenerationSummary, Generator, GeneratorConfig};
use schemaforge_core::Notifier;
use schemaforge_ir::{DiagramFile, ModelSource, Schema};

use crate::Outcome;
use crate::cli::GenerateArgs;
use crate::console::{self, ConsoleNotifier};

pub fn run(args: GenerateArgs) -> Result<Outcome> {
    let config = resolve_config(&args)?;
    tracing::debug!(?config, "generator configuration");

    let generator = Generator::new(config);
    let source = DiagramFile::new(&args.diagram);
    let notifier = ConsoleNotifier::new();

    if args.dry_run {
        return dry_run(&generator, &source, &notifier);
    }

    match generator
        .run(&source, &notifier)
        .with_context(|| format!("failed to generate from {}", source.describe()))?
    {
        Some(summary) => {
            println!();
            print!("{summary}");
            println!("Output: {}", generator.config().output_dir.display());
            Ok(Outcome::Success)
        }
        None => Ok(Outcome::Aborted),
    }
}

/// Configuration file (if any) overridden by command-line flags
fn resolve_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_toml_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(timestamp) = args.timestamp {
        config.timestamp = Some(timestamp);
    }
    if args.no_enums {
        config.generate_enums = false;
    }
    Ok(config)
}

fn dry_run(generator: &Generator, source: &DiagramFile, notifier: &dyn Notifier) -> Result<Outcome> {
    let diagram = source
        .load()
        .with_context(|| format!("failed to load {}", source.describe()))?;
    let schema = Schema::from_diagram(&diagram);

    let project = match generator.generate(&schema) {
        Ok(project) => project,
        Err(e) if e.is_validation() => {
            notifier.error(&e.to_string());
            return Ok(Outcome::Aborted);
        }
        Err(e) => return Err(e.into()),
    };

    let output_dir = &generator.config().output_dir;
    for file in &project.files {
        println!(
            "{} ({} bytes)",
            output_dir.join(&file.path).display(),
            file.content.len()
        );
    }
    for warning in &project.warnings {
        console::warning(warning);
    }
    println!();
    print!("{}", GenerationSummary::from_project(&project));
    println!("Dry run: nothing was written.");

    Ok(Outcome::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> GenerateArgs {
        GenerateArgs {
            diagram: PathBuf::from("d.json"),
            output: None,
            config: None,
            timestamp: None,
            no_enums: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("schemaforge.toml");
        std::fs::write(&path, "output_dir = \"from-file\"\ngenerate_enums = true\n").unwrap();

        let mut args = args();
        args.config = Some(path);
        assert_eq!(resolve_config(&args).unwrap().output_dir, PathBuf::from("from-file"));

        args.output = Some(PathBuf::from("from-flag"));
        args.no_enums = true;
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("from-flag"));
        assert!(!config.generate_enums);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let mut args = args();
        args.config = Some(PathBuf::from("/definitely/not/here.toml"));
        assert!(resolve_config(&args).is_err());
    }
}
