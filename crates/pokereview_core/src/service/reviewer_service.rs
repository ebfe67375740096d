//! Reviewer request handling.
//!
//! # Invariants
//! - Create rejects duplicate (first name, last name) pairs under trim +
//!   case-fold comparison.
//! - An empty reviewer listing is reported as `NotFound`.
//! - `get_reviews_by_reviewer` requires the reviewer to exist; the review
//!   list itself may be empty.

use crate::model::review::Review;
use crate::model::reviewer::{Reviewer, ReviewerId};
use crate::repo::reviewer_repo::ReviewerRepository;
use crate::service::{is_blank, normalize_name, ServiceError, ServiceResult};

/// Request-handling facade for reviewer operations.
pub struct ReviewerService<R: ReviewerRepository> {
    repo: R,
}

impl<R: ReviewerRepository> ReviewerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all reviewers. An empty catalog is `NotFound`.
    pub fn list_reviewers(&self) -> ServiceResult<Vec<Reviewer>> {
        let reviewers = self.repo.list_reviewers()?;
        if reviewers.is_empty() {
            return Err(ServiceError::NotFound("no reviewers found".to_string()));
        }
        Ok(reviewers)
    }

    /// Loads one reviewer by id.
    pub fn get_reviewer(&self, reviewer_id: ReviewerId) -> ServiceResult<Reviewer> {
        if !self.repo.reviewer_exists(reviewer_id)? {
            return Err(not_found(reviewer_id));
        }
        self.repo
            .get_reviewer(reviewer_id)?
            .ok_or_else(|| not_found(reviewer_id))
    }

    /// Creates one reviewer after duplicate screening.
    pub fn create_reviewer(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> ServiceResult<Reviewer> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        if is_blank(&first_name) || is_blank(&last_name) {
            return Err(ServiceError::InvalidInput(
                "reviewer first and last name must not be blank".to_string(),
            ));
        }
        self.ensure_name_pair_available(&first_name, &last_name)?;

        let reviewer = Reviewer::new(first_name, last_name);
        self.repo.create_reviewer(&reviewer)?;
        Ok(reviewer)
    }

    /// Replaces the mutable fields of one reviewer.
    pub fn update_reviewer(
        &self,
        reviewer_id: ReviewerId,
        payload: &Reviewer,
    ) -> ServiceResult<Reviewer> {
        if payload.uuid != reviewer_id {
            return Err(ServiceError::InvalidInput(format!(
                "payload id {} does not match target id {reviewer_id}",
                payload.uuid
            )));
        }
        if !self.repo.reviewer_exists(reviewer_id)? {
            return Err(not_found(reviewer_id));
        }
        self.repo.update_reviewer(payload)?;
        self.repo
            .get_reviewer(reviewer_id)?
            .ok_or_else(|| not_found(reviewer_id))
    }

    /// Deletes one reviewer. Their reviews are dropped with them.
    pub fn delete_reviewer(&self, reviewer_id: ReviewerId) -> ServiceResult<()> {
        if !self.repo.reviewer_exists(reviewer_id)? {
            return Err(not_found(reviewer_id));
        }
        let reviewer = self
            .repo
            .get_reviewer(reviewer_id)?
            .ok_or_else(|| not_found(reviewer_id))?;
        self.repo.delete_reviewer(&reviewer)?;
        Ok(())
    }

    /// Lists reviews written by one reviewer. The reviewer must exist.
    pub fn get_reviews_by_reviewer(&self, reviewer_id: ReviewerId) -> ServiceResult<Vec<Review>> {
        if !self.repo.reviewer_exists(reviewer_id)? {
            return Err(not_found(reviewer_id));
        }
        Ok(self.repo.get_reviews_by_reviewer(reviewer_id)?)
    }

    fn ensure_name_pair_available(&self, first_name: &str, last_name: &str) -> ServiceResult<()> {
        let wanted_first = normalize_name(first_name);
        let wanted_last = normalize_name(last_name);
        let existing = self.repo.list_reviewers()?;
        if existing.iter().any(|reviewer| {
            normalize_name(&reviewer.first_name) == wanted_first
                && normalize_name(&reviewer.last_name) == wanted_last
        }) {
            return Err(ServiceError::Conflict(format!(
                "reviewer already exists: `{} {}`",
                first_name.trim(),
                last_name.trim()
            )));
        }
        Ok(())
    }
}

fn not_found(reviewer_id: ReviewerId) -> ServiceError {
    ServiceError::NotFound(format!("reviewer not found: {reviewer_id}"))
}
