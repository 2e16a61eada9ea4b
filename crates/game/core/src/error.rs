//! Common error infrastructure for cherts-core.
//!
//! This module provides shared types and traits used across all error types in cherts-core.
//! Domain-specific errors (e.g., `ConfigError`, `ExpressionError`) are defined in their
//! respective modules alongside the code that raises them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Rich Context**: Errors carry the offending name or expression text
//! - **Severity Classification**: Errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Nothing in the core is retried: every operation is deterministic, so the
/// only recovery is to fix the offending input and call again.
/// - **Validation**: Invalid content that should be rejected without retry
/// - **Fatal**: Unrecoverable errors that abort session setup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: malformed waypoint expression, unknown move type name
    Validation,

    /// Fatal error - session setup cannot continue.
    ///
    /// Examples: unknown participant identity, a third player joining
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the failure aborts session setup.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all cherts-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Fatal.is_fatal());
        assert!(!ErrorSeverity::Validation.is_fatal());
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
