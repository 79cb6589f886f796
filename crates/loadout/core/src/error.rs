//! Common error infrastructure for loadout-core.
//!
//! Domain-specific errors (`GridError`, `EquipError`) live in their modules
//! alongside the operations they guard; this module provides the shared
//! severity classification and the trait every engine error implements.
//!
//! Expected outcomes — slot occupied, no placement found, item not found,
//! no snapshot pending — are recoverable results callers branch on as normal
//! control flow. Contract violations (zero-capacity container, equipping a
//! non-gear item) indicate a defect in a calling collaborator.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - an expected outcome the caller handles in-band.
    ///
    /// Examples: slot already occupied, no room in any container
    Recoverable,

    /// Validation error - a calling collaborator broke a precondition.
    ///
    /// Examples: zero-capacity container, equipping a non-gear item
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: occupancy table desync with the contained-item list.
    /// These indicate bugs and should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all loadout-core errors.
///
/// Provides a uniform interface for error classification across the crate.
/// Implementors derive Display/Error via `thiserror` and classify severity
/// based on recoverability, not impact.
pub trait InventoryError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str;
}
