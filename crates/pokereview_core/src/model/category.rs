//! Category domain model.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another category.
//! - `name` uniqueness is enforced at create time by the service layer,
//!   using trim + case-fold comparison.

use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for category records.
pub type CategoryId = Uuid;

/// Grouping label attached to pokemon through a link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable global ID used for linking and auditing.
    pub uuid: CategoryId,
    /// User-facing label. Stored as provided; compared normalized.
    pub name: String,
}

impl Category {
    /// Creates a new category with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Creates a category with a caller-provided stable ID.
    ///
    /// Used by transport/import paths where identity already exists.
    pub fn with_id(
        uuid: CategoryId,
        name: impl Into<String>,
    ) -> Result<Self, ModelValidationError> {
        if uuid.is_nil() {
            return Err(ModelValidationError::NilId);
        }
        Ok(Self {
            uuid,
            name: name.into(),
        })
    }
}
