//! Column statements
//!
//! Translates one [`Column`] into a single schema-builder statement such as
//! `$table->string('email', 191)->unique()->comment('Login');`, plus a
//! trailing `$table->index(...)` statement when the column asks for one.

use schemaforge_ir::{Column, ColumnType, DefaultValue, naming};

use crate::migrations::constraints;
use crate::php;

/// Statements produced for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStatement {
    /// The column definition itself
    pub definition: String,

    /// Secondary index statement, if requested
    pub index: Option<String>,
}

impl ColumnStatement {
    /// All statement lines, definition first
    pub fn lines(&self) -> Vec<&str> {
        std::iter::once(self.definition.as_str())
            .chain(self.index.as_deref())
            .collect()
    }
}

/// Translate a column into its statement(s).
///
/// `primary_key_count` is the number of primary-key columns of the owning
/// table; the inline `->primary()` is only emitted when it is exactly one.
/// Returns `None` for `created_at`/`updated_at`, which are covered by
/// `$table->timestamps()`, and for unnamed columns.
pub fn translate_column(column: &Column, primary_key_count: usize) -> Option<ColumnStatement> {
    if column.is_timestamp() || column.name.trim().is_empty() {
        return None;
    }

    let mut stmt = format!("$table->{}", type_clause(column));

    if column.is_unique {
        stmt.push_str("->unique()");
    }

    match &column.default_value {
        Some(DefaultValue::Null) => stmt.push_str("->nullable()"),
        Some(DefaultValue::Literal(value)) => match column.enum_name() {
            Some(enum_name) => stmt.push_str(&format!(
                "->default({}::{})",
                naming::class_name(enum_name),
                value
            )),
            None => stmt.push_str(&format!("->default({})", value)),
        },
        None => {}
    }

    if column.is_primary_key && primary_key_count == 1 {
        stmt.push_str("->primary()");
    }

    if let Some(doc) = &column.documentation {
        stmt.push_str(&format!("->comment({})", php::quote(doc)));
    }

    stmt.push(';');

    tracing::trace!(column = %column.name, statement = %stmt, "column translated");

    Some(ColumnStatement {
        definition: stmt,
        index: column.wants_index().then(|| constraints::index(&column.name)),
    })
}

/// `kind('name'[, args])` or `enum('name', Class::values())`
fn type_clause(column: &Column) -> String {
    let name = php::quote(&column.name);
    match &column.column_type {
        ColumnType::Primitive { kind, args } => match args {
            Some(args) if kind.accepts_size() => {
                format!("{}({}, {})", kind.as_str(), name, args.render())
            }
            _ => format!("{}({})", kind.as_str(), name),
        },
        ColumnType::EnumRef(enum_name) => {
            format!("enum({}, {}::values())", name, naming::class_name(enum_name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schemaforge_core::{ColumnKind, SizeArgs};

    fn column(name: &str, kind: ColumnKind) -> Column {
        Column::new(name, kind)
    }

    fn definition(column: &Column, pk_count: usize) -> String {
        translate_column(column, pk_count).unwrap().definition
    }

    #[test]
    fn test_plain_column() {
        assert_eq!(
            definition(&column("name", ColumnKind::String), 0),
            "$table->string('name');"
        );
    }

    #[test]
    fn test_timestamp_columns_are_skipped() {
        assert!(translate_column(&column("created_at", ColumnKind::Timestamp), 0).is_none());
        assert!(translate_column(&column("updated_at", ColumnKind::Timestamp), 0).is_none());
        assert!(translate_column(&column("  ", ColumnKind::String), 0).is_none());
        assert!(translate_column(&column("deleted_at", ColumnKind::Timestamp), 0).is_some());
    }

    #[test]
    fn test_size_arguments() {
        let mut price = column("price", ColumnKind::Decimal);
        price.column_type = ColumnType::Primitive {
            kind: ColumnKind::Decimal,
            args: Some(SizeArgs::Pair("8".to_string(), "2".to_string())),
        };
        assert_eq!(definition(&price, 0), "$table->decimal('price', 8, 2);");

        let mut email = column("email", ColumnKind::String);
        email.column_type = ColumnType::Primitive {
            kind: ColumnKind::String,
            args: Some(SizeArgs::Raw("191".to_string())),
        };
        assert_eq!(definition(&email, 0), "$table->string('email', 191);");
    }

    #[test]
    fn test_size_arguments_ignored_for_sizeless_kinds() {
        let mut age = column("age", ColumnKind::Integer);
        age.column_type = ColumnType::Primitive {
            kind: ColumnKind::Integer,
            args: Some(SizeArgs::Raw("11".to_string())),
        };
        assert_eq!(definition(&age, 0), "$table->integer('age');");
    }

    #[test]
    fn test_modifier_order() {
        let mut code = column("code", ColumnKind::String);
        code.is_unique = true;
        code.is_primary_key = true;
        code.default_value = Some(DefaultValue::Literal("'X'".to_string()));
        code.documentation = Some("Short code".to_string());
        assert_eq!(
            definition(&code, 1),
            "$table->string('code')->unique()->default('X')->primary()->comment('Short code');"
        );
    }

    #[test]
    fn test_null_default_is_nullable() {
        let mut bio = column("bio", ColumnKind::Text);
        bio.default_value = Some(DefaultValue::Null);
        assert_eq!(definition(&bio, 0), "$table->text('bio')->nullable();");
    }

    #[test]
    fn test_primary_only_for_single_key() {
        let mut id = column("id", ColumnKind::BigIncrements);
        id.is_primary_key = true;
        assert_eq!(definition(&id, 1), "$table->bigIncrements('id')->primary();");
        assert_eq!(definition(&id, 2), "$table->bigIncrements('id');");
    }

    #[test]
    fn test_enum_column() {
        let mut status = column("status", ColumnKind::String);
        status.column_type = ColumnType::EnumRef("order status".to_string());
        status.default_value = Some(DefaultValue::Literal("Pending".to_string()));
        assert_eq!(
            definition(&status, 0),
            "$table->enum('status', OrderStatus::values())->default(OrderStatus::Pending);"
        );
    }

    #[test]
    fn test_comment_is_escaped() {
        let mut note = column("note", ColumnKind::Text);
        note.documentation = Some("It's a\nmulti-line C:\\ note".to_string());
        assert_eq!(
            definition(&note, 0),
            "$table->text('note')->comment('It\\'s a multi-line C:\\\\ note');"
        );
    }

    #[test]
    fn test_index_statement() {
        let mut email = column("email", ColumnKind::String);
        email.classification = "Index".to_string();
        let stmt = translate_column(&email, 0).unwrap();
        assert_eq!(stmt.index.as_deref(), Some("$table->index('email');"));
        assert_eq!(
            stmt.lines(),
            vec!["$table->string('email');", "$table->index('email');"]
        );

        email.classification = "in".to_string();
        assert!(translate_column(&email, 0).unwrap().index.is_some());
    }
}
