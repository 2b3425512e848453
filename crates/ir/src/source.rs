//! Model sources
//!
//! The compiler never reaches for a global diagram repository. Whatever
//! hosts it hands over a [`ModelSource`] that yields the diagram to compile.

use crate::Diagram;
use crate::serialization::load_diagram;
use schemaforge_core::EngineResult;
use std::path::{Path, PathBuf};

/// Capability that yields the diagram to compile
pub trait ModelSource {
    /// Short human-readable description used in log output
    fn describe(&self) -> String;

    /// Load the diagram snapshot for one compilation run
    fn load(&self) -> EngineResult<Diagram>;
}

/// An in-memory diagram is its own source
impl ModelSource for Diagram {
    fn describe(&self) -> String {
        format!("diagram '{}'", self.name)
    }

    fn load(&self) -> EngineResult<Diagram> {
        Ok(self.clone())
    }
}

/// A diagram document on disk
#[derive(Debug, Clone)]
pub struct DiagramFile {
    path: PathBuf,
}

impl DiagramFile {
    /// Create a source reading the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the document
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for DiagramFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> EngineResult<Diagram> {
        load_diagram(&self.path)
    }
}
