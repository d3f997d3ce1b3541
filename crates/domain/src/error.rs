//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

use crate::value_objects::Difficulty;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Challenge configuration rejected at start time (empty target list,
    /// non-positive duration)
    #[error("Invalid challenge config: {0}")]
    InvalidChallengeConfig(String),

    /// Catalog sampling cannot satisfy the requested per-tier counts
    #[error("Insufficient catalog: requested {requested} {difficulty} objects, only {available} available")]
    InsufficientCatalog {
        difficulty: Difficulty,
        requested: usize,
        available: usize,
    },

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create an invalid challenge config error.
    ///
    /// Use this when `Challenge` construction preconditions are violated:
    /// - The target object list is empty
    /// - The duration is zero
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidChallengeConfig(msg.into())
    }

    /// Create an insufficient catalog error for a difficulty tier.
    pub fn insufficient_catalog(difficulty: Difficulty, requested: usize, available: usize) -> Self {
        Self::InsufficientCatalog {
            difficulty,
            requested,
            available,
        }
    }

    /// Create a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
