//! Table constraints
//!
//! Composite primary keys, secondary indexes and foreign-key blocks.
//! Foreign keys come from association edges only.

use schemaforge_ir::Association;

use crate::php;

/// Referential action applied to every foreign key
pub const ON_DELETE: &str = "cascade";

/// `$table->primary(['a', 'b']);`, only for two or more columns
pub fn composite_primary_key<S: AsRef<str>>(columns: &[S]) -> Option<String> {
    (columns.len() >= 2).then(|| format!("$table->primary({});", php::string_array(columns)))
}

/// `$table->index('name');`
pub fn index(column: &str) -> String {
    format!("$table->index({});", php::quote(column))
}

/// `$table->timestamps();`
pub fn timestamps() -> &'static str {
    "$table->timestamps();"
}

/// Lines of one foreign-key block.
///
/// The first line is the `foreign(...)` call; the chained calls follow,
/// meant to be written one level deeper.
pub fn foreign_key_block(assoc: &Association, referenced_table: &str) -> (String, Vec<String>) {
    (
        format!("$table->foreign({})", php::quote(&assoc.referencing_column)),
        vec![
            format!("->references({})", php::quote(&assoc.referenced_column)),
            format!("->on({})", php::quote(referenced_table)),
            format!("->onDelete({});", php::quote(ON_DELETE)),
        ],
    )
}
