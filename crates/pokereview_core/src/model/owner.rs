//! Owner domain model.
//!
//! # Invariants
//! - (`first_name`, `last_name`) uniqueness is enforced at create time by
//!   the service layer.
//! - `country_uuid` is wired at create time and never changed by updates;
//!   it becomes `None` when the referenced country is deleted.

use crate::model::country::CountryId;
use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for owner records.
pub type OwnerId = Uuid;

/// Person who owns pokemon in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Stable global ID used for linking and auditing.
    pub uuid: OwnerId,
    pub first_name: String,
    pub last_name: String,
    /// Home country reference. `None` after the country was deleted.
    pub country_uuid: Option<CountryId>,
}

impl Owner {
    /// Creates a new owner with a generated stable ID and no country wired.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            country_uuid: None,
        }
    }

    /// Creates an owner with a caller-provided stable ID.
    pub fn with_id(
        uuid: OwnerId,
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
            country_uuid: None,
        })
    }
}
