//! # SchemaForge IR (Intermediate Representation)
//!
//! This crate provides the model the compiler reads: the diagram document as
//! exported by the modelling tool, and the typed schema extracted from it.
//!
//! ## Core Concepts
//!
//! - **Diagram**: views and model elements exactly as the tool exports them
//! - **Schema**: the typed snapshot compiled in one run
//! - **Table**: a class classified as "Table"; becomes one migration
//! - **Column**: an attribute with a resolved [`ColumnType`]
//! - **Enumeration**: named literals; becomes one enum class
//! - **Association**: a foreign-key edge between two tables
//! - **ModelSource**: the capability that hands a diagram to the compiler
//!

// Module declarations
pub mod diagram;
pub mod naming;
pub mod schema;
pub mod serialization;
pub mod source;
pub mod validation;

// Re-export commonly used types at crate root
pub use diagram::{
    AssociationElement, AssociationEnd, AttributeElement, AttributeType, ClassElement, Diagram,
    EnumerationElement, LiteralElement, ModelElement, OwnedElement, View,
};
pub use schema::{
    Association, Column, ColumnType, DefaultValue, Enumeration, Literal, Schema, TIMESTAMP_COLUMNS,
    Table,
};
pub use serialization::{load_diagram, load_diagram_from_str, save_diagram, save_diagram_to_string};
pub use source::{DiagramFile, ModelSource};
pub use validation::{ValidationResult, ValidationRule, Validator};

// Re-export core types that are commonly used with IR
pub use schemaforge_core::{ColumnKind, EngineError, EngineResult, SizeArgs};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
