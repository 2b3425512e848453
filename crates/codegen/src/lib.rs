//! # SchemaForge Codegen
//!
//! Code generation engine for SchemaForge.
//!
//! This crate turns an extracted [`Schema`](schemaforge_ir::Schema) into
//! Laravel migration files and enum classes.
//!
//! ## Features
//!
//! - **Dependency Ordering**: referenced tables are created first
//! - **Migration Generation**: one `create_*_table` migration per table
//! - **Enum Generation**: one constant-bearing class per enumeration plus a
//!   shared `BaseEnum`
//! - **Driver**: load → validate → order → emit → write, with a summary
//!

// ============================================================================
// Modules
// ============================================================================

pub mod context;
pub mod enums;
pub mod generator;
pub mod migrations;
pub mod ordering;
pub mod php;
pub mod writer;

// ============================================================================
// Re-exports
// ============================================================================

pub use context::GenerationContext;
pub use enums::EnumRegistry;
pub use generator::{GenerationSummary, Generator, generate, generate_to_dir, summarize};
pub use ordering::dependency_order;
pub use writer::CodeWriter;

use chrono::NaiveDateTime;
use schemaforge_core::{EngineError, EngineResult, Validatable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the code generator
///
/// Every field has a default, so a TOML configuration file only needs the
/// keys it wants to change:
///
/// ```toml
/// output_dir = "database/migrations"
/// enum_namespace = "App\\Enums"
/// timestamp = "2024-05-01T09:30:00"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Output directory for generated files
    pub output_dir: PathBuf,

    /// File extension of generated files
    pub extension: String,

    /// Subdirectory (of the output directory) for enum classes
    pub enums_dir: String,

    /// PHP namespace of the enum classes
    pub enum_namespace: String,

    /// Whether to generate enum classes
    pub generate_enums: bool,

    /// Fixed base time for migration file names; the current local time
    /// when unset
    pub timestamp: Option<NaiveDateTime>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./generated"),
            extension: "php".to_string(),
            enums_dir: "Enums".to_string(),
            enum_namespace: "App\\Enums".to_string(),
            generate_enums: true,
            timestamp: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: GeneratorConfig =
            toml::from_str(text).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text).map_err(|e| match e {
            EngineError::InvalidConfig(msg) => {
                EngineError::InvalidConfig(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the enum class namespace
    pub fn with_enum_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.enum_namespace = namespace.into();
        self
    }

    /// Pin the base time used for migration file names
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Disable enum class generation
    pub fn without_enums(mut self) -> Self {
        self.generate_enums = false;
        self
    }
}

impl Validatable for GeneratorConfig {
    fn validate(&self) -> EngineResult<()> {
        if self.extension.trim().is_empty() || self.extension.starts_with('.') {
            return Err(EngineError::InvalidConfig(format!(
                "extension must be a bare file extension such as 'php', got '{}'",
                self.extension
            )));
        }
        if self.enums_dir.trim().is_empty() || Path::new(&self.enums_dir).is_absolute() {
            return Err(EngineError::InvalidConfig(format!(
                "enums_dir must be a relative directory name, got '{}'",
                self.enums_dir
            )));
        }
        if self.enum_namespace.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "enum_namespace cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated file
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Relative path from output directory
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// What the file contains
    pub kind: FileKind,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind,
        }
    }

    /// File name without directories
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Kind of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A `create_*_table` migration
    Migration,
    /// One enum class
    Enumeration,
    /// The shared `BaseEnum` class
    EnumerationBase,
}

// ============================================================================
// GeneratedProject
// ============================================================================

/// Collection of all files generated in one run
#[derive(Debug, Clone, Default)]
pub struct GeneratedProject {
    /// Diagram name
    pub name: String,

    /// All generated files, migrations first in dependency order
    pub files: Vec<GeneratedFile>,

    /// Warnings generated during code generation
    pub warnings: Vec<String>,
}

impl GeneratedProject {
    /// Create a new generated project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add a file to the project
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Get the number of files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get files by kind
    pub fn files_of_kind(&self, kind: FileKind) -> Vec<&GeneratedFile> {
        self.files.iter().filter(|f| f.kind == kind).collect()
    }

    /// Write all files to disk, in order.
    ///
    /// Files written before a failure stay on disk.
    pub fn write_to_disk(&self, base_dir: impl AsRef<Path>) -> EngineResult<()> {
        let base_dir = base_dir.as_ref();

        for file in &self.files {
            let full_path = base_dir.join(&file.path);

            // Create parent directories
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| EngineError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }

            std::fs::write(&full_path, &file.content).map_err(|e| EngineError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;

            tracing::debug!(path = %full_path.display(), bytes = file.content.len(), "file written");
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
