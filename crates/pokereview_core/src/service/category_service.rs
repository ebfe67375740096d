//! Category request handling.
//!
//! # Invariants
//! - Create rejects duplicate names under trim + case-fold comparison.
//! - An empty category listing is reported as `NotFound`; this endpoint
//!   treats emptiness as absence.

use crate::model::category::{Category, CategoryId};
use crate::model::pokemon::Pokemon;
use crate::repo::category_repo::CategoryRepository;
use crate::service::{is_blank, normalize_name, ServiceError, ServiceResult};

/// Request-handling facade for category operations.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all categories. An empty catalog is `NotFound`.
    pub fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        let categories = self.repo.list_categories()?;
        if categories.is_empty() {
            return Err(ServiceError::NotFound("no categories found".to_string()));
        }
        Ok(categories)
    }

    /// Loads one category by id.
    pub fn get_category(&self, category_id: CategoryId) -> ServiceResult<Category> {
        if !self.repo.category_exists(category_id)? {
            return Err(not_found(category_id));
        }
        self.repo
            .get_category(category_id)?
            .ok_or_else(|| not_found(category_id))
    }

    /// Creates one category after duplicate screening.
    ///
    /// Rejection order: blank name, then duplicate, then storage.
    pub fn create_category(&self, name: impl Into<String>) -> ServiceResult<Category> {
        let name = name.into();
        if is_blank(&name) {
            return Err(ServiceError::InvalidInput(
                "category name must not be blank".to_string(),
            ));
        }
        self.ensure_name_available(&name)?;

        let category = Category::new(name);
        self.repo.create_category(&category)?;
        Ok(category)
    }

    /// Replaces the mutable fields of one category.
    ///
    /// The payload id must match `category_id`; mismatches are rejected
    /// without touching storage.
    pub fn update_category(
        &self,
        category_id: CategoryId,
        payload: &Category,
    ) -> ServiceResult<Category> {
        if payload.uuid != category_id {
            return Err(ServiceError::InvalidInput(format!(
                "payload id {} does not match target id {category_id}",
                payload.uuid
            )));
        }
        if !self.repo.category_exists(category_id)? {
            return Err(not_found(category_id));
        }
        self.repo.update_category(payload)?;
        self.repo
            .get_category(category_id)?
            .ok_or_else(|| not_found(category_id))
    }

    /// Deletes one category. Pokemon links are dropped with it.
    pub fn delete_category(&self, category_id: CategoryId) -> ServiceResult<()> {
        if !self.repo.category_exists(category_id)? {
            return Err(not_found(category_id));
        }
        let category = self
            .repo
            .get_category(category_id)?
            .ok_or_else(|| not_found(category_id))?;
        self.repo.delete_category(&category)?;
        Ok(())
    }

    /// Lists pokemon attached to one category. May be empty.
    pub fn get_pokemon_by_category(&self, category_id: CategoryId) -> ServiceResult<Vec<Pokemon>> {
        Ok(self.repo.get_pokemon_by_category(category_id)?)
    }

    fn ensure_name_available(&self, name: &str) -> ServiceResult<()> {
        let wanted = normalize_name(name);
        let existing = self.repo.list_categories()?;
        if existing
            .iter()
            .any(|category| normalize_name(&category.name) == wanted)
        {
            return Err(ServiceError::Conflict(format!(
                "category already exists: `{}`",
                name.trim()
            )));
        }
        Ok(())
    }
}

fn not_found(category_id: CategoryId) -> ServiceError {
    ServiceError::NotFound(format!("category not found: {category_id}"))
}
