//! `schemaforge validate`

use anyhow::{Context, Result};
use colored::Colorize;
use schemaforge_codegen::dependency_order;
use schemaforge_core::Notifier;
use schemaforge_ir::{DiagramFile, ModelSource, Schema, Validator};

use crate::Outcome;
use crate::cli::DiagramArgs;
use crate::console::{self, ConsoleNotifier};

pub fn run(args: DiagramArgs) -> Result<Outcome> {
    let source = DiagramFile::new(&args.diagram);
    let diagram = source
        .load()
        .with_context(|| format!("failed to load {}", source.describe()))?;
    let schema = Schema::from_diagram(&diagram);
    let notifier = ConsoleNotifier::new();

    let result = Validator::with_default_rules().validate(&schema);
    for warning in &result.warnings {
        console::warning(&warning.to_string());
    }
    for error in &result.errors {
        notifier.error(&error.to_string());
        if let Some(suggestion) = &error.suggestion {
            eprintln!("  {} {}", "hint:".cyan(), suggestion);
        }
    }
    if result.has_errors() {
        return Ok(Outcome::Aborted);
    }

    if let Err(e) = dependency_order(&schema.tables, &schema.associations) {
        notifier.error(&e.to_string());
        return Ok(Outcome::Aborted);
    }

    notifier.info(&format!(
        "{} is valid: {} table(s), {} enumeration(s), {} foreign key(s), {} warning(s)",
        source.describe(),
        schema.tables.len(),
        schema.enumerations.len(),
        schema.associations.len(),
        result.warnings.len()
    ));
    Ok(Outcome::Success)
}
