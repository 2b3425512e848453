//! # Code Generator Orchestrator
//!
//! The `Generator` is the top-level entry point for code generation. It takes
//! a [`Schema`] and a [`GeneratorConfig`], builds a [`GenerationContext`], and
//! delegates to the migration and enum emitters to produce a complete
//! [`GeneratedProject`].
//!
//! ## Pipeline
//!
//! ```text
//! ModelSource ──load──► Diagram ──extract──► Schema
//!         │
//!         ▼
//!   Validator (errors abort, warnings are kept)
//!         │
//!         ▼
//!   GenerationContext::from_schema()   (dependency order)
//!         │
//!         ├──► migrations::generate_migrations() → Vec<GeneratedFile>
//!         ├──► enums::generate_enums()           → Vec<GeneratedFile>
//!         │
//!         ▼
//!   GeneratedProject { files, warnings } ──► write_to_disk
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemaforge_codegen::{Generator, GeneratorConfig};
//! use schemaforge_core::TracingNotifier;
//! use schemaforge_ir::DiagramFile;
//!
//! let generator = Generator::new(GeneratorConfig::new().with_output_dir("out"));
//! if let Some(summary) = generator.run(&DiagramFile::new("shop.json"), &TracingNotifier)? {
//!     println!("{summary}");
//! }
//! ```

use schemaforge_core::{EngineResult, Notifier, Validatable};
use schemaforge_ir::{ModelSource, Schema, Validator};

use crate::context::GenerationContext;
use crate::enums;
use crate::migrations;
use crate::{FileKind, GeneratedProject, GeneratorConfig};

// ============================================================================
// Generator
// ============================================================================

/// Top-level code generator that orchestrates the full generation pipeline.
///
/// The `Generator` is stateless aside from its configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    /// Configuration controlling output behaviour (output dir, namespace, ...)
    config: GeneratorConfig,
}

impl Generator {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Run the file-free part of the pipeline on a schema.
    ///
    /// # Steps
    ///
    /// 1. **Validate** the schema. Errors abort; warnings are carried into
    ///    the output.
    /// 2. **Order** the tables by foreign-key dependency.
    /// 3. **Generate migrations**, one per table.
    /// 4. **Generate enum classes** when any enumeration exists.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for an unusable configuration, `NoTables` for an
    /// empty schema, `Validation` for invalid columns and `DependencyCycle`
    /// when the tables cannot be ordered.
    pub fn generate(&self, schema: &Schema) -> EngineResult<GeneratedProject> {
        // ── 1. Validate ──────────────────────────────────────────────────
        self.config.validate()?;
        let validation = Validator::with_default_rules().validate(schema);
        validation.to_result()?;

        // ── 2. Build context ─────────────────────────────────────────────
        let ctx = GenerationContext::from_schema(schema, self.config.clone())?;

        // ── 3. Generate migrations ───────────────────────────────────────
        let migration_files = migrations::generate_migrations(&ctx);

        // ── 4. Generate enum classes ─────────────────────────────────────
        let enum_files = enums::generate_enums(&ctx);

        // ── 5. Assemble output ───────────────────────────────────────────
        let mut output = GeneratedProject::new(&schema.name);
        for file in migration_files.into_iter().chain(enum_files) {
            output.add_file(file);
        }
        for warning in &validation.warnings {
            tracing::warn!("{}", warning);
            output.add_warning(warning.to_string());
        }

        tracing::info!(
            files = output.file_count(),
            warnings = output.warnings.len(),
            diagram = %schema.name,
            "code generation complete",
        );

        Ok(output)
    }

    /// Generate files and write them to the configured output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails or if any file cannot be written.
    pub fn generate_and_write(&self, schema: &Schema) -> EngineResult<GeneratedProject> {
        let output = self.generate(schema)?;
        output.write_to_disk(&self.config.output_dir)?;
        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            files = output.file_count(),
            "files written to disk",
        );
        Ok(output)
    }

    // ====================================================================
    // Driver
    // ====================================================================

    /// Compile the diagram of `source` and write the result.
    ///
    /// Problems with the diagram itself (no tables, invalid columns,
    /// circular foreign keys) are reported through `notifier` as a single
    /// error notification; nothing is written and `Ok(None)` is returned.
    /// On success an info notification carries the summary.
    ///
    /// # Errors
    ///
    /// Loading and filesystem failures propagate. Files written before a
    /// write failure are left in place.
    pub fn run(
        &self,
        source: &dyn ModelSource,
        notifier: &dyn Notifier,
    ) -> EngineResult<Option<GenerationSummary>> {
        tracing::debug!(source = %source.describe(), "loading diagram");
        let diagram = source.load()?;
        let schema = Schema::from_diagram(&diagram);

        let output = match self.generate(&schema) {
            Ok(output) => output,
            Err(e) if e.is_validation() => {
                notifier.error(&e.to_string());
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        output.write_to_disk(&self.config.output_dir)?;

        let summary = GenerationSummary::from_project(&output);
        notifier.info(&summary.message());
        Ok(Some(summary))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// Standalone convenience functions
// ============================================================================

/// Generate files from a schema using default configuration.
pub fn generate(schema: &Schema) -> EngineResult<GeneratedProject> {
    Generator::with_defaults().generate(schema)
}

/// Generate files and write them to the specified output directory.
pub fn generate_to_dir(
    schema: &Schema,
    output_dir: impl Into<std::path::PathBuf>,
) -> EngineResult<GeneratedProject> {
    let config = GeneratorConfig::new().with_output_dir(output_dir);
    Generator::new(config).generate_and_write(schema)
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// A human-readable summary of a completed generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Diagram name.
    pub diagram_name: String,
    /// Number of migration files (one per table).
    pub tables: usize,
    /// Number of enum class files, excluding the base class.
    pub enumerations: usize,
    /// Total number of files generated.
    pub total_files: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Total bytes of generated content.
    pub total_bytes: usize,
}

impl GenerationSummary {
    /// Build a summary from a generated project.
    pub fn from_project(project: &GeneratedProject) -> Self {
        Self {
            diagram_name: project.name.clone(),
            tables: project.files_of_kind(FileKind::Migration).len(),
            enumerations: project.files_of_kind(FileKind::Enumeration).len(),
            total_files: project.file_count(),
            warning_count: project.warnings.len(),
            total_bytes: project.files.iter().map(|f| f.content.len()).sum(),
        }
    }

    /// One-line message for notifications
    pub fn message(&self) -> String {
        format!(
            "Generated {} migration(s) and {} enum class(es)",
            self.tables, self.enumerations
        )
    }

    /// Format the summary as a human-readable box.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Code Generation Complete                 ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Diagram:      {:<34}║\n", self.diagram_name));
        out.push_str(&format!("║  Migrations:   {:<34}║\n", self.tables));
        out.push_str(&format!("║  Enum classes: {:<34}║\n", self.enumerations));
        out.push_str(&format!("║  Total Files:  {:<34}║\n", self.total_files));
        out.push_str(&format!("║  Warnings:     {:<34}║\n", self.warning_count));

        let size_str = if self.total_bytes < 1024 {
            format!("{} B", self.total_bytes)
        } else if self.total_bytes < 1024 * 1024 {
            format!("{:.1} KB", self.total_bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", self.total_bytes as f64 / (1024.0 * 1024.0))
        };
        out.push_str(&format!("║  Total Size:   {:<34}║\n", size_str));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Produce a [`GenerationSummary`] from a [`GeneratedProject`].
pub fn summarize(project: &GeneratedProject) -> GenerationSummary {
    GenerationSummary::from_project(project)
}

// ============================================================================
// Tests
// ============================================================================
