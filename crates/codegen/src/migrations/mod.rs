//! # Migration Generation
//!
//! This module generates Laravel migration files from the schema's tables.
//! Migrations are ordered by dependency (referenced tables first).
//!
//! ## Generated Files
//!
//! Each table produces a migration file named:
//! ```text
//! {YYYY_MM_DD_HHMMSS}_create_{table_name}_table.php
//! ```
//! where the timestamp token grows by one second per table, so the
//! framework runs them in dependency order.
//!
//! ## Features
//!
//! - One fluent statement per column with size arguments and modifiers
//!   (`unique`, `nullable`, `default`, `primary`, `comment`)
//! - Enum-typed columns backed by the generated enum classes
//! - Composite primary keys and secondary indexes
//! - `timestamps()` in place of `created_at`/`updated_at`
//! - Foreign keys from associations with cascading deletes
//! - `dropIfExists` reversal

pub mod column;
pub mod constraints;
pub mod emitter;

pub use column::{ColumnStatement, translate_column};
pub use emitter::{generate_migration, generate_migrations};
