//! # SchemaForge Core
//!
//! Core types, traits, and error handling for SchemaForge.
//!
//! This crate provides the foundational building blocks used throughout
//! the compiler, including:
//!
//! - **Types**: the Laravel column vocabulary (`ColumnKind`) and size
//!   arguments (`SizeArgs`)
//! - **Traits**: `Validatable` and the `Notifier` sink
//! - **Errors**: Unified error handling with `EngineError` and `EngineResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult};
pub use traits::{NoticeLevel, Notifier, RecordingNotifier, TracingNotifier, Validatable};
pub use types::{ColumnKind, SizeArgs, UnknownColumnKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
