//! Review domain model.
//!
//! # Invariants
//! - Every review points at exactly one pokemon and one reviewer.
//! - Both references are fixed at create time; updates replace only
//!   `title`, `text` and `rating`.

use crate::model::pokemon::PokemonId;
use crate::model::reviewer::ReviewerId;
use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for review records.
pub type ReviewId = Uuid;

/// Written review of one pokemon by one reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Stable global ID used for linking and auditing.
    pub uuid: ReviewId,
    pub title: String,
    /// Review body. Create rejects the empty string.
    pub text: String,
    /// Small integer score, stored as provided.
    pub rating: i32,
    /// Reviewed pokemon. Review is removed when the pokemon is deleted.
    pub pokemon_uuid: PokemonId,
    /// Review author. Review is removed when the reviewer is deleted.
    pub reviewer_uuid: ReviewerId,
}

impl Review {
    /// Creates a new review with a generated stable ID.
    pub fn new(
        pokemon_uuid: PokemonId,
        reviewer_uuid: ReviewerId,
        title: impl Into<String>,
        text: impl Into<String>,
        rating: i32,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            text: text.into(),
            rating,
            pokemon_uuid,
            reviewer_uuid,
        }
    }

    /// Creates a review with a caller-provided stable ID.
    pub fn with_id(
        uuid: ReviewId,
        pokemon_uuid: PokemonId,
        reviewer_uuid: ReviewerId,
        title: impl Into<String>,
        text: impl Into<String>,
        rating: i32,
    ) -> Result<Self, ModelValidationError> {
        if uuid.is_nil() {
            return Err(ModelValidationError::NilId);
        }
        Ok(Self {
            uuid,
            title: title.into(),
            text: text.into(),
            rating,
            pokemon_uuid,
            reviewer_uuid,
        })
    }
}
