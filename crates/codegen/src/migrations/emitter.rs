//! Migration emitter
//!
//! Assembles one `create_*_table` migration per table: the `up()` creation
//! block and the `down()` reversal block.

use schemaforge_ir::{Table, naming};

use crate::context::GenerationContext;
use crate::migrations::column::translate_column;
use crate::migrations::constraints;
use crate::php;
use crate::writer::CodeWriter;
use crate::{FileKind, GeneratedFile};

/// Framework classes every migration imports
const FRAMEWORK_IMPORTS: [&str; 3] = [
    "Illuminate\\Support\\Facades\\Schema",
    "Illuminate\\Database\\Schema\\Blueprint",
    "Illuminate\\Database\\Migrations\\Migration",
];

/// Generate migrations for every table, in dependency order.
pub fn generate_migrations(ctx: &GenerationContext) -> Vec<GeneratedFile> {
    ctx.tables()
        .iter()
        .enumerate()
        .map(|(position, table)| generate_migration(ctx, position, table))
        .collect()
}

/// Generate the migration for the table at `position` in dependency order.
pub fn generate_migration(ctx: &GenerationContext, position: usize, table: &Table) -> GeneratedFile {
    let table_name = naming::sanitize(&table.name);
    let mut w = CodeWriter::new();

    w.line("<?php");
    w.blank();
    for enum_name in table.referenced_enums() {
        w.line(format!("use {};", ctx.enum_fqcn(enum_name)));
    }
    for import in FRAMEWORK_IMPORTS {
        w.line(format!("use {};", import));
    }
    w.blank();

    w.line(format!(
        "class {} extends Migration",
        GenerationContext::migration_class_name(&table.name)
    ));
    w.block("{", "}", |w| {
        php::doc_block(w, "Run the migrations.\n\n@return void");
        w.line("public function up()");
        w.block("{", "}", |w| {
            w.block(
                format!(
                    "Schema::create({}, function (Blueprint $table) {{",
                    php::quote(&table_name)
                ),
                "});",
                |w| write_creation_body(w, ctx, table),
            );
        });
        w.blank();
        php::doc_block(w, "Reverse the migrations.\n\n@return void");
        w.line("public function down()");
        w.block("{", "}", |w| {
            w.line(format!("Schema::dropIfExists({});", php::quote(&table_name)));
        });
    });

    let filename = ctx.migration_filename(position, &table.name);
    tracing::debug!(table = %table.name, file = %filename, "migration generated");

    GeneratedFile::new(filename, w.finish(), FileKind::Migration)
}

/// Statements inside `Schema::create`: columns (each followed by its index),
/// composite key, timestamps, then foreign-key blocks after a blank line.
fn write_creation_body(w: &mut CodeWriter, ctx: &GenerationContext, table: &Table) {
    let pk_count = table.primary_key_count();
    let mut statements: Vec<String> = Vec::new();

    for column in &table.columns {
        if let Some(stmt) = translate_column(column, pk_count) {
            statements.push(stmt.definition);
            statements.extend(stmt.index);
        }
    }

    let pk_names: Vec<&str> = table
        .primary_key_columns()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    statements.extend(constraints::composite_primary_key(&pk_names));

    if table.has_timestamps() {
        statements.push(constraints::timestamps().to_string());
    }

    let has_statements = !statements.is_empty();
    w.lines(statements);

    let foreign_keys: Vec<(String, Vec<String>)> = ctx
        .outgoing_associations(&table.id)
        .into_iter()
        .filter_map(|assoc| {
            ctx.referenced_table_name(assoc)
                .map(|referenced| constraints::foreign_key_block(assoc, &referenced))
        })
        .collect();

    for (i, (head, chain)) in foreign_keys.into_iter().enumerate() {
        if i > 0 || has_statements {
            w.blank();
        }
        w.line(head);
        w.indent();
        w.lines(chain);
        w.outdent();
    }
}
