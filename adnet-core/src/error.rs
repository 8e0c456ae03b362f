//! Error types for ADNET.
//!
//! This module provides the error hierarchy using `thiserror`. Every registry
//! operation returns `Result<T, AdNetError>`; errors are values, never panics,
//! and a failed operation never leaves a record partially mutated.

use thiserror::Error;

use crate::types::Principal;

/// Result type alias using `AdNetError`.
pub type Result<T> = std::result::Result<T, AdNetError>;

/// Main error type for all ADNET operations.
#[derive(Debug, Error)]
pub enum AdNetError {
    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// No ad campaign exists at the given id.
    #[error("ad campaign not found: {0}")]
    AdNotFound(u64),

    /// No publisher exists at the given id.
    #[error("publisher not found: {0}")]
    PublisherNotFound(u64),

    /// The caller is not the owner of the record it tried to mutate.
    #[error("caller {caller} is not the owner of record {id}")]
    NotOwner {
        /// The principal that attempted the mutation.
        caller: Principal,
        /// The id of the record it tried to mutate.
        id: u64,
    },

    /// Crediting earnings would overflow the unsigned integer domain.
    #[error("earnings overflow: {current} + {amount} exceeds u64")]
    EarningsOverflow {
        /// Earnings accumulated so far.
        current: u64,
        /// The credit that would overflow.
        amount: u64,
    },

    /// Ledger file is malformed or corrupted.
    #[error("ledger error: {0}")]
    LedgerError(String),

    /// Snapshot format version mismatch.
    #[error("snapshot version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Version this build reads and writes.
        expected: u8,
        /// Version found in the file.
        actual: u8,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Caller principal string is malformed.
    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),

    /// Input validation failed.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION & STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Internal invariant violation (should never happen).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl AdNetError {
    /// Returns true if this error means the addressed record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AdNetError::AdNotFound(_) | AdNetError::PublisherNotFound(_)
        )
    }

    /// Returns true if this error is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AdNetError::NotOwner { .. })
    }

    /// Returns true if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            AdNetError::InvalidPrincipal(_)
                | AdNetError::ValidationError(_)
                | AdNetError::VersionMismatch { .. }
        )
    }
}
