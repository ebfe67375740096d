//! Review request handling.
//!
//! # Invariants
//! - Create rejects an empty review text before any storage access; the
//!   comparison is exact, not trimmed.
//! - Reviewer and pokemon references arrive out-of-band and must resolve,
//!   reviewer checked first.
//! - Updates replace `title`/`text`/`rating` only; both references are
//!   fixed for the review's lifetime.

use crate::model::pokemon::PokemonId;
use crate::model::review::{Review, ReviewId};
use crate::model::reviewer::ReviewerId;
use crate::repo::pokemon_repo::PokemonRepository;
use crate::repo::review_repo::ReviewRepository;
use crate::repo::reviewer_repo::ReviewerRepository;
use crate::service::{ServiceError, ServiceResult};

/// Request payload for creating one review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub title: String,
    pub text: String,
    pub rating: i32,
}

/// Request-handling facade for review operations.
pub struct ReviewService<R: ReviewRepository, V: ReviewerRepository, P: PokemonRepository> {
    reviews: R,
    reviewers: V,
    pokemon: P,
}

impl<R: ReviewRepository, V: ReviewerRepository, P: PokemonRepository> ReviewService<R, V, P> {
    /// Creates a service using the provided repository implementations.
    pub fn new(reviews: R, reviewers: V, pokemon: P) -> Self {
        Self {
            reviews,
            reviewers,
            pokemon,
        }
    }

    /// Lists all reviews. May be empty.
    pub fn list_reviews(&self) -> ServiceResult<Vec<Review>> {
        Ok(self.reviews.list_reviews()?)
    }

    /// Loads one review by id.
    pub fn get_review(&self, review_id: ReviewId) -> ServiceResult<Review> {
        if !self.reviews.review_exists(review_id)? {
            return Err(not_found(review_id));
        }
        self.reviews
            .get_review(review_id)?
            .ok_or_else(|| not_found(review_id))
    }

    /// Creates one review wired to an existing reviewer and pokemon.
    ///
    /// Rejection order: empty text, then missing reviewer, then missing
    /// pokemon, then storage.
    pub fn create_review(
        &self,
        reviewer_id: ReviewerId,
        pokemon_id: PokemonId,
        request: &NewReview,
    ) -> ServiceResult<Review> {
        if request.text.is_empty() {
            return Err(ServiceError::Conflict(
                "review text must not be empty".to_string(),
            ));
        }
        if !self.reviewers.reviewer_exists(reviewer_id)? {
            return Err(ServiceError::NotFound(format!(
                "reviewer not found: {reviewer_id}"
            )));
        }
        if !self.pokemon.pokemon_exists(pokemon_id)? {
            return Err(ServiceError::NotFound(format!(
                "pokemon not found: {pokemon_id}"
            )));
        }

        let review = Review::new(
            pokemon_id,
            reviewer_id,
            request.title.clone(),
            request.text.clone(),
            request.rating,
        );
        self.reviews.create_review(&review)?;
        Ok(review)
    }

    /// Replaces the mutable fields of one review.
    pub fn update_review(&self, review_id: ReviewId, payload: &Review) -> ServiceResult<Review> {
        if payload.uuid != review_id {
            return Err(ServiceError::InvalidInput(format!(
                "payload id {} does not match target id {review_id}",
                payload.uuid
            )));
        }
        if !self.reviews.review_exists(review_id)? {
            return Err(not_found(review_id));
        }
        self.reviews.update_review(payload)?;
        self.reviews
            .get_review(review_id)?
            .ok_or_else(|| not_found(review_id))
    }

    /// Deletes one review.
    pub fn delete_review(&self, review_id: ReviewId) -> ServiceResult<()> {
        if !self.reviews.review_exists(review_id)? {
            return Err(not_found(review_id));
        }
        let review = self
            .reviews
            .get_review(review_id)?
            .ok_or_else(|| not_found(review_id))?;
        self.reviews.delete_review(&review)?;
        Ok(())
    }

    /// Lists reviews written for one pokemon. May be empty.
    pub fn get_reviews_of_a_pokemon(&self, pokemon_id: PokemonId) -> ServiceResult<Vec<Review>> {
        Ok(self.reviews.get_reviews_of_a_pokemon(pokemon_id)?)
    }
}

fn not_found(review_id: ReviewId) -> ServiceError {
    ServiceError::NotFound(format!("review not found: {review_id}"))
}
