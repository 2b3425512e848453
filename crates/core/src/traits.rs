//! Core traits for SchemaForge
//!
//! This module defines the behaviours shared across crates: validation of
//! configuration and model objects, and the notification sink through which
//! the compiler talks to whoever hosts it.

use crate::error::EngineResult;
use std::cell::RefCell;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or an `EngineError` describing the problem.
    fn validate(&self) -> EngineResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Notifier Trait
// ============================================================================

/// User-facing notification sink.
///
/// The compiler never prints on its own. Success summaries and aborted runs
/// are reported through this trait so that a CLI, an editor plugin or a test
/// can decide how to surface them.
pub trait Notifier {
    /// Report a successful outcome.
    fn info(&self, message: &str);

    /// Report an error the user has to act on.
    fn error(&self, message: &str);
}

/// Notifier that forwards messages to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Severity of a recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Notifier that keeps every message in memory.
///
/// Useful for tests and for hosts that want to render notifications after
/// the run has finished.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices recorded so far, in order.
    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.borrow().clone()
    }

    /// Messages recorded at the given level.
    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.notices
            .borrow_mut()
            .push((NoticeLevel::Info, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices
            .borrow_mut()
            .push((NoticeLevel::Error, message.to_string()));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    struct NonEmpty(&'static str);

    impl Validatable for NonEmpty {
        fn validate(&self) -> EngineResult<()> {
            if self.0.is_empty() {
                return Err(EngineError::validation("value cannot be empty"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_validatable_default_is_valid() {
        assert!(NonEmpty("x").is_valid());
        assert!(!NonEmpty("").is_valid());
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.info("first");
        notifier.error("second");
        notifier.info("third");

        assert_eq!(notifier.notices().len(), 3);
        assert_eq!(notifier.messages(NoticeLevel::Error), vec!["second".to_string()]);
        assert_eq!(
            notifier.messages(NoticeLevel::Info),
            vec!["first".to_string(), "third".to_string()]
        );
    }
}
