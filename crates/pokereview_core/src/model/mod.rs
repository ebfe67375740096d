//! Domain models for the review catalog.
//!
//! # Responsibility
//! - Define the canonical record per catalog entity.
//! - Keep identity and relationship shapes consistent across entities.
//!
//! # Invariants
//! - Every record is identified by a stable non-nil UUID.
//! - Relationship fields hold ids only; linked records are loaded through
//!   repositories, never embedded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category;
pub mod country;
pub mod owner;
pub mod pokemon;
pub mod review;
pub mod reviewer;

/// Validation failure raised by entity constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Caller-provided id is the nil UUID.
    NilId,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "entity id must not be the nil uuid"),
        }
    }
}

impl Error for ModelValidationError {}
