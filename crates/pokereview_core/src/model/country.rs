//! Country domain model.

use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for country records.
pub type CountryId = Uuid;

/// Home country referenced by owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Stable global ID used for linking and auditing.
    pub uuid: CountryId,
    /// User-facing label. Stored as provided; compared normalized.
    pub name: String,
}

impl Country {
    /// Creates a new country with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Creates a country with a caller-provided stable ID.
    pub fn with_id(uuid: CountryId, name: impl Into<String>) -> Result<Self, ModelValidationError> {
        if uuid.is_nil() {
            return Err(ModelValidationError::NilId);
        }
        Ok(Self {
            uuid,
            name: name.into(),
        })
    }
}
