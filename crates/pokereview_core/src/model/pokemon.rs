//! Pokemon domain model.

use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for pokemon records.
pub type PokemonId = Uuid;

/// Catalog pokemon. Owner and category links live in link tables and are
/// read through repository extensions, not embedded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Stable global ID used for linking and auditing.
    pub uuid: PokemonId,
    /// User-facing label. Stored as provided; compared normalized.
    pub name: String,
    /// Unix epoch milliseconds.
    pub birth_date: i64,
}

impl Pokemon {
    /// Creates a new pokemon with a generated stable ID.
    pub fn new(name: impl Into<String>, birth_date: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            birth_date,
        }
    }

    /// Creates a pokemon with a caller-provided stable ID.
    pub fn with_id(
        uuid: PokemonId,
        name: impl Into<String>,
        birth_date: i64,
    ) -> Result<Self, ModelValidationError> {
        if uuid.is_nil() {
            return Err(ModelValidationError::NilId);
        }
        Ok(Self {
            uuid,
            name: name.into(),
            birth_date,
        })
    }
}
