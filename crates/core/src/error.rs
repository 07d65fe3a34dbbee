//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, uniqueness conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed validation (malformed or out-of-range input).
    #[error("validation failed on {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A business with this name already exists (names are globally unique).
    #[error("a business with this name already exists")]
    DuplicateName,

    /// A product with this SKU already exists within the same business.
    #[error("a product with this SKU already exists in this business")]
    DuplicateSku,

    /// The entity is absent, or not owned by the caller. The two cases are
    /// never distinguished to the client.
    #[error("not found")]
    NotFound,

    /// An outbound transaction would drive stock negative. Carries the
    /// pre-transaction quantity for client display.
    #[error("insufficient stock: current quantity is {available}")]
    InsufficientStock { available: u64 },

    /// No valid credential presented.
    #[error("unauthenticated")]
    Unauthenticated,
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn insufficient_stock(available: u64) -> Self {
        Self::InsufficientStock { available }
    }
}
