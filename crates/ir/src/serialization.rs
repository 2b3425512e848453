//! Loading and saving diagram documents
//!
//! Diagram documents are JSON exports of a class diagram (see
//! [`Diagram`]). This module reads them from disk or from a string and
//! writes them back, mapping failures onto `EngineError`.

use crate::Diagram;
use schemaforge_core::{EngineError, EngineResult};
use std::path::Path;

// ============================================================================
// Constants
// ============================================================================

/// Conventional file extension for diagram documents
pub const DIAGRAM_EXTENSION: &str = "json";

// ============================================================================
// Load Functions
// ============================================================================

/// Load a diagram from a file
///
/// # Example
///
/// ```rust,ignore
/// use schemaforge_ir::load_diagram;
///
/// let diagram = load_diagram("shop.json")?;
/// println!("Loaded diagram: {}", diagram.name);
/// ```
pub fn load_diagram(path: impl AsRef<Path>) -> EngineResult<Diagram> {
    let path = path.as_ref();

    let json = std::fs::read_to_string(path).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    load_diagram_from_str(&json).map_err(|e| match e {
        EngineError::JsonSerialization(je) => EngineError::DiagramParse {
            path: path.to_path_buf(),
            message: je.to_string(),
        },
        other => other,
    })
}

/// Load a diagram from a JSON string
pub fn load_diagram_from_str(json: &str) -> EngineResult<Diagram> {
    let diagram: Diagram = serde_json::from_str(json)?;
    Ok(diagram)
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a diagram to a file as pretty-printed JSON
pub fn save_diagram(diagram: &Diagram, path: impl AsRef<Path>) -> EngineResult<()> {
    let path = path.as_ref();
    let json = save_diagram_to_string(diagram)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| EngineError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| EngineError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}

/// Save a diagram to a pretty-printed JSON string
pub fn save_diagram_to_string(diagram: &Diagram) -> EngineResult<String> {
    Ok(serde_json::to_string_pretty(diagram)?)
}

// ============================================================================
// Tests
// ============================================================================
