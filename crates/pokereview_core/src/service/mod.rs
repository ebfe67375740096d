//! Request-handling services for the review catalog.
//!
//! # Responsibility
//! - Orchestrate repository calls into per-entity use-case APIs.
//! - Own validation, uniqueness screening and reference resolution.
//!
//! # Invariants
//! - Every rejection is classified (`code()`) and carries a readable reason.
//! - Rejection order per operation is stable: payload shape, then
//!   create-time rules, then reference resolution, then storage.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_service;
pub mod country_service;
pub mod owner_service;
pub mod pokemon_service;
pub mod review_service;
pub mod reviewer_service;

/// Result type shared by all catalog services.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Classified rejection returned by catalog services.
#[derive(Debug)]
pub enum ServiceError {
    /// Payload shape or identity failed validation before storage access.
    InvalidInput(String),
    /// Target record does not exist, or a listing treats emptiness as absence.
    NotFound(String),
    /// Create-time rule rejected the payload (duplicate, empty review text).
    Conflict(String),
    /// Persistence-layer failure.
    Storage(RepoError),
}

impl ServiceError {
    /// Stable machine-readable code for transport layers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Storage(_) => "storage_failure",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(reason) => write!(f, "{reason}"),
            Self::NotFound(reason) => write!(f, "{reason}"),
            Self::Conflict(reason) => write!(f, "{reason}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(format!("record not found: {id}")),
            other => Self::Storage(other),
        }
    }
}

/// Normalizes one identifying field for uniqueness comparison.
///
/// Comparison semantics are trim + Unicode lowercase; stored values keep
/// their original spelling.
pub fn normalize_name(value: &str) -> String {
    value.trim().to_lowercase()
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
