//! Reviewer domain model.

use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for reviewer records.
pub type ReviewerId = Uuid;

/// Person who writes pokemon reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    /// Stable global ID used for linking and auditing.
    pub uuid: ReviewerId,
    pub first_name: String,
    pub last_name: String,
}

impl Reviewer {
    /// Creates a new reviewer with a generated stable ID.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Creates a reviewer with a caller-provided stable ID.
    pub fn with_id(
        uuid: ReviewerId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, ModelValidationError> {
        if uuid.is_nil() {
            return Err(ModelValidationError::NilId);
        }
        Ok(Self {
            uuid,
            first_name: first_name.into(),
            last_name: last_name.into(),
        })
    }
}
