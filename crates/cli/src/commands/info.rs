//! `schemaforge info`

use anyhow::{Context, Result};
use colored::Colorize;
use schemaforge_codegen::{EnumRegistry, dependency_order};
use schemaforge_ir::{ColumnType, DiagramFile, ModelSource, Schema, naming};

use crate::Outcome;
use crate::cli::DiagramArgs;
use crate::console;

pub fn run(args: DiagramArgs) -> Result<Outcome> {
    let source = DiagramFile::new(&args.diagram);
    let diagram = source
        .load()
        .with_context(|| format!("failed to load {}", source.describe()))?;
    let schema = Schema::from_diagram(&diagram);

    println!("{} {}", "Diagram:".bold(), schema.name);
    println!();

    console::heading("Tables");
    let order = match dependency_order(&schema.tables, &schema.associations) {
        Ok(order) => order,
        Err(e) => {
            console::warning(&e.to_string());
            (0..schema.tables.len()).collect()
        }
    };
    for (position, &i) in order.iter().enumerate() {
        let table = &schema.tables[i];
        let pk: Vec<&str> = table
            .primary_key_columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        println!(
            "  {:>2}. {} ({}) - {} column(s), primary key: {}",
            position + 1,
            table.name.bold(),
            naming::sanitize(&table.name),
            table.columns.len(),
            if pk.is_empty() { "-".to_string() } else { pk.join(", ") }
        );
        for assoc in schema.outgoing(&table.id) {
            let target = schema
                .table(&assoc.referenced_table)
                .map(|t| naming::sanitize(&t.name))
                .unwrap_or_default();
            println!(
                "        {} {} → {}.{}",
                "fk".dimmed(),
                assoc.referencing_column,
                target,
                assoc.referenced_column
            );
        }
        for column in &table.columns {
            if let ColumnType::EnumRef(name) = &column.column_type {
                println!("        {} {} → {}", "enum".dimmed(), column.name, name);
            }
        }
    }
    if schema.tables.is_empty() {
        println!("  (none)");
    }
    println!();

    console::heading("Enumerations");
    let registry = EnumRegistry::from_schema(&schema);
    for name in registry.names() {
        let keys = registry.keys(name).unwrap_or_default();
        println!("  {} [{}]", name.bold(), keys.join(", "));
    }
    if registry.is_empty() {
        println!("  (none)");
    }

    Ok(Outcome::Success)
}
