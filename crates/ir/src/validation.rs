//! Validation rules and utilities for extracted schemas
//!
//! Validation never repairs anything. Errors stop a compilation before any
//! file is written; warnings are carried along with the generated output.

use crate::naming::sanitize;
use crate::{ColumnType, DefaultValue, Schema};
use schemaforge_core::{EngineError, EngineResult};
use std::collections::{HashMap, HashSet};

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of a validation operation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationError>,

    /// List of warnings (non-fatal issues)
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert to EngineResult (fails if any errors)
    pub fn to_result(&self) -> EngineResult<()> {
        if self.errors.iter().any(|e| e.code == ValidationErrorCode::NoTables) {
            return Err(EngineError::NoTables);
        }
        if self.valid {
            Ok(())
        } else {
            let msg = self
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            Err(EngineError::validation(msg))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationError
// ============================================================================

/// A validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Path to the problematic element (e.g., "tables.Order.columns.customer_id")
    pub path: Option<String>,

    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
            suggestion: None,
        }
    }

    /// Add a path to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a suggestion to the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Error codes for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    NoTables,
    ForeignKeyTag,
}

// ============================================================================
// ValidationWarning
// ============================================================================

/// A validation warning (non-fatal issue)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning code
    pub code: ValidationWarningCode,

    /// Human-readable warning message
    pub message: String,

    /// Path to the element
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Create a new warning
    pub fn new(code: ValidationWarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] Warning: {}", path, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

/// Warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    EmptyTableName,
    EmptyColumnName,
    DuplicateTableName,
    DuplicateColumnName,
    MissingForeignKeyColumn,
    UnknownEnumDefault,
    EmptyEnumeration,
    DuplicateEnumerationName,
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait for validation rules
pub trait ValidationRule {
    /// Get the rule name
    fn name(&self) -> &'static str;

    /// Validate a schema and return the result
    fn validate(&self, schema: &Schema) -> ValidationResult;
}

// ============================================================================
// Validator
// ============================================================================

/// Schema validator that runs multiple validation rules
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with default rules
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(TablesRule));
        validator.add_rule(Box::new(ColumnsRule));
        validator.add_rule(Box::new(AssociationsRule));
        validator.add_rule(Box::new(EnumerationsRule));
        validator
    }

    /// Add a validation rule
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Validate a schema with all rules
    pub fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for rule in &self.rules {
            let rule_result = rule.validate(schema);
            tracing::trace!(
                rule = rule.name(),
                errors = rule_result.errors.len(),
                warnings = rule_result.warnings.len(),
                "validation rule finished"
            );
            result.merge(rule_result);
        }

        result
    }

    /// Validate and return Result
    pub fn validate_result(&self, schema: &Schema) -> EngineResult<()> {
        self.validate(schema).to_result()
    }
}

// ============================================================================
// Built-in Validation Rules
// ============================================================================

/// Rule: the schema has tables; names should be usable and distinct
pub struct TablesRule;

impl ValidationRule for TablesRule {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if schema.tables.is_empty() {
            result.add_error(
                ValidationError::new(ValidationErrorCode::NoTables, "No tables found")
                    .with_suggestion("Set the classification of at least one class to 'Table'"),
            );
            return result;
        }

        let mut seen: HashMap<String, &str> = HashMap::new();
        for table in &schema.tables {
            let sanitized = sanitize(&table.name);
            if sanitized.is_empty() {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::EmptyTableName,
                        format!(
                            "Table '{}' has no usable name; its migration creates a table without a name",
                            table.name
                        ),
                    )
                    .with_path(format!("tables.{}", table.id)),
                );
                continue;
            }

            if let Some(previous) = seen.insert(sanitized.clone(), &table.name) {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::DuplicateTableName,
                        format!(
                            "Tables '{}' and '{}' both map to '{}'; their migrations declare the same class and table and will collide when run",
                            previous, table.name, sanitized
                        ),
                    )
                    .with_path(format!("tables.{}", table.name)),
                );
            }
        }

        result
    }
}

/// Rule: columns do not encode foreign keys in their classification, and
/// should be named and distinct
pub struct ColumnsRule;

impl ValidationRule for ColumnsRule {
    fn name(&self) -> &'static str {
        "columns"
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for table in &schema.tables {
            let mut seen: HashSet<&str> = HashSet::new();

            for column in &table.columns {
                let path = format!("tables.{}.columns.{}", table.name, column.name);

                if column.name.trim().is_empty() {
                    result.add_warning(
                        ValidationWarning::new(
                            ValidationWarningCode::EmptyColumnName,
                            format!(
                                "Table '{}' has a column without a name; it is left out of the migration",
                                table.name
                            ),
                        )
                        .with_path(format!("tables.{}", table.name)),
                    );
                    continue;
                }

                if !seen.insert(column.name.as_str()) {
                    result.add_warning(
                        ValidationWarning::new(
                            ValidationWarningCode::DuplicateColumnName,
                            format!(
                                "Column '{}' is declared more than once in '{}'",
                                column.name, table.name
                            ),
                        )
                        .with_path(&path),
                    );
                }

                if column.has_foreign_key_tag() {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::ForeignKeyTag,
                            format!(
                                "Column '{}.{}' declares a foreign key through its classification '{}'",
                                table.name, column.name, column.classification
                            ),
                        )
                        .with_path(&path)
                        .with_suggestion(
                            "Draw an association between the two tables instead; associations are the only foreign-key source",
                        ),
                    );
                }
            }
        }

        result
    }
}

/// Rule: association ends name columns that exist
pub struct AssociationsRule;

impl ValidationRule for AssociationsRule {
    fn name(&self) -> &'static str {
        "associations"
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for assoc in &schema.associations {
            let ends = [
                (&assoc.referencing_table, &assoc.referencing_column),
                (&assoc.referenced_table, &assoc.referenced_column),
            ];
            for (table_id, column) in ends {
                let Some(table) = schema.table(table_id) else {
                    continue;
                };
                if table.column(column).is_none() {
                    result.add_warning(
                        ValidationWarning::new(
                            ValidationWarningCode::MissingForeignKeyColumn,
                            format!(
                                "Association references column '{}' which is not declared on '{}'",
                                column, table.name
                            ),
                        )
                        .with_path(format!("associations.{}", assoc.id)),
                    );
                }
            }
        }

        result
    }
}

/// Rule: enumerations have literals and enum-typed defaults name one of them
pub struct EnumerationsRule;

impl ValidationRule for EnumerationsRule {
    fn name(&self) -> &'static str {
        "enumerations"
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let mut seen: HashSet<String> = HashSet::new();

        for enumeration in &schema.enumerations {
            let path = format!("enumerations.{}", enumeration.name);
            if enumeration.literals.is_empty() {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::EmptyEnumeration,
                        format!("Enumeration '{}' has no literals", enumeration.name),
                    )
                    .with_path(&path),
                );
            }
            if !seen.insert(crate::naming::class_name(&enumeration.name)) {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::DuplicateEnumerationName,
                        format!(
                            "Enumeration '{}' shares its class name with another enumeration",
                            enumeration.name
                        ),
                    )
                    .with_path(&path),
                );
            }
        }

        for table in &schema.tables {
            for column in &table.columns {
                let (ColumnType::EnumRef(enum_name), Some(DefaultValue::Literal(value))) =
                    (&column.column_type, &column.default_value)
                else {
                    continue;
                };
                let Some(enumeration) = schema.enumeration(enum_name) else {
                    continue;
                };
                if !enumeration.literals.iter().any(|l| &l.name == value) {
                    result.add_warning(
                        ValidationWarning::new(
                            ValidationWarningCode::UnknownEnumDefault,
                            format!(
                                "Default '{}' of '{}.{}' is not a literal of '{}'",
                                value, table.name, column.name, enum_name
                            ),
                        )
                        .with_path(format!("tables.{}.columns.{}", table.name, column.name)),
                    );
                }
            }
        }

        result
    }
}

// ============================================================================
// Tests
// ============================================================================
