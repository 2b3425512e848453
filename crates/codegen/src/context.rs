//! # Generation Context
//!
//! The `GenerationContext` holds all the information the emitters need to
//! produce output files. It is built once per run from a [`Schema`] and
//! provides:
//!
//! - Tables in dependency order (referenced tables first)
//! - Foreign-key lookups per table
//! - The enumeration registry
//! - Migration file naming (timestamp tokens, class names)

use chrono::{Duration, NaiveDateTime};
use schemaforge_core::EngineResult;
use schemaforge_ir::{Association, Enumeration, Schema, Table, naming};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::GeneratorConfig;
use crate::enums::EnumRegistry;
use crate::ordering::dependency_order;

/// Layout of migration timestamp tokens (Laravel's own format)
pub const MIGRATION_TOKEN_FORMAT: &str = "%Y_%m_%d_%H%M%S";

// ============================================================================
// GenerationContext
// ============================================================================

/// Context carrying everything needed for one generation run.
///
/// Shared by reference with every emitter.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Generator configuration
    pub config: GeneratorConfig,

    /// Diagram name
    pub name: String,

    // ── tables ───────────────────────────────────────────────────────────
    /// Tables in dependency order
    tables: Vec<Table>,

    /// Lookup: table id → index into `tables`
    table_index: HashMap<String, usize>,

    // ── associations ─────────────────────────────────────────────────────
    associations: Vec<Association>,

    /// Lookup: table id → associations where the table holds the foreign key
    outgoing: HashMap<String, Vec<usize>>,

    // ── enumerations ─────────────────────────────────────────────────────
    enumerations: Vec<Enumeration>,
    registry: EnumRegistry,

    // ── derived ──────────────────────────────────────────────────────────
    /// Base time of the migration tokens
    pub migration_base: NaiveDateTime,
}

impl GenerationContext {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Build a context from a schema and generator config.
    ///
    /// # Errors
    ///
    /// Fails with `DependencyCycle` when the tables cannot be ordered.
    pub fn from_schema(schema: &Schema, config: GeneratorConfig) -> EngineResult<Self> {
        let order = dependency_order(&schema.tables, &schema.associations)?;
        let tables: Vec<Table> = order.iter().map(|&i| schema.tables[i].clone()).collect();

        let table_index: HashMap<String, usize> = tables
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        let associations = schema.associations.clone();
        let mut outgoing: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, assoc) in associations.iter().enumerate() {
            outgoing
                .entry(assoc.referencing_table.clone())
                .or_default()
                .push(i);
        }

        let migration_base = config
            .timestamp
            .unwrap_or_else(|| chrono::Local::now().naive_local());

        Ok(Self {
            name: schema.name.clone(),
            tables,
            table_index,
            associations,
            outgoing,
            enumerations: schema.enumerations.clone(),
            registry: EnumRegistry::from_schema(schema),
            migration_base,
            config,
        })
    }

    // ====================================================================
    // Table accessors
    // ====================================================================

    /// All tables in dependency order (referenced tables first).
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Get a table by id.
    pub fn table_by_id(&self, id: &str) -> Option<&Table> {
        self.table_index.get(id).map(|&i| &self.tables[i])
    }

    /// Associations where the table is the referencing side, in diagram
    /// order.
    pub fn outgoing_associations(&self, table_id: &str) -> Vec<&Association> {
        self.outgoing
            .get(table_id)
            .map(|indices| indices.iter().map(|&i| &self.associations[i]).collect())
            .unwrap_or_default()
    }

    /// Database name of the table an association points at
    pub fn referenced_table_name(&self, assoc: &Association) -> Option<String> {
        self.table_by_id(&assoc.referenced_table)
            .map(|t| naming::sanitize(&t.name))
    }

    // ====================================================================
    // Enumeration accessors
    // ====================================================================

    /// All enumerations in diagram order.
    pub fn enumerations(&self) -> &[Enumeration] {
        &self.enumerations
    }

    /// The enumeration registry.
    pub fn enum_registry(&self) -> &EnumRegistry {
        &self.registry
    }

    /// Fully-qualified class name of an enumeration (`App\Enums\Status`)
    pub fn enum_fqcn(&self, enum_name: &str) -> String {
        format!("{}\\{}", self.config.enum_namespace, naming::class_name(enum_name))
    }

    /// Output path of an enum class file
    pub fn enum_path(&self, class_name: &str) -> PathBuf {
        PathBuf::from(&self.config.enums_dir)
            .join(format!("{}.{}", class_name, self.config.extension))
    }

    // ====================================================================
    // Migration naming
    // ====================================================================

    /// Timestamp token for the table at `position` in dependency order.
    ///
    /// The token is the base time plus `position` seconds, so tokens are
    /// unique within a run and sort lexically in dependency order.
    pub fn migration_token(&self, position: usize) -> String {
        let instant = i64::try_from(position)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|offset| self.migration_base.checked_add_signed(offset))
            .unwrap_or(self.migration_base);
        instant.format(MIGRATION_TOKEN_FORMAT).to_string()
    }

    /// Migration file name for the table at `position`
    /// (`2024_05_01_093000_create_order_table.php`).
    pub fn migration_filename(&self, position: usize, table_name: &str) -> String {
        format!(
            "{}_create_{}_table.{}",
            self.migration_token(position),
            naming::sanitize(table_name),
            self.config.extension
        )
    }

    /// Migration class name (`CreateOrderLineTable`)
    pub fn migration_class_name(table_name: &str) -> String {
        format!("Create{}Table", naming::class_name(&naming::sanitize(table_name)))
    }
}
