//! Country request handling.
//!
//! # Invariants
//! - Create rejects duplicate names under trim + case-fold comparison.
//! - An empty country listing is reported as `NotFound`.

use crate::model::country::{Country, CountryId};
use crate::model::owner::OwnerId;
use crate::repo::country_repo::CountryRepository;
use crate::service::{is_blank, normalize_name, ServiceError, ServiceResult};

/// Request-handling facade for country operations.
pub struct CountryService<R: CountryRepository> {
    repo: R,
}

impl<R: CountryRepository> CountryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all countries. An empty catalog is `NotFound`.
    pub fn list_countries(&self) -> ServiceResult<Vec<Country>> {
        let countries = self.repo.list_countries()?;
        if countries.is_empty() {
            return Err(ServiceError::NotFound("no countries found".to_string()));
        }
        Ok(countries)
    }

    /// Loads one country by id.
    pub fn get_country(&self, country_id: CountryId) -> ServiceResult<Country> {
        if !self.repo.country_exists(country_id)? {
            return Err(not_found(country_id));
        }
        self.repo
            .get_country(country_id)?
            .ok_or_else(|| not_found(country_id))
    }

    /// Creates one country after duplicate screening.
    pub fn create_country(&self, name: impl Into<String>) -> ServiceResult<Country> {
        let name = name.into();
        if is_blank(&name) {
            return Err(ServiceError::InvalidInput(
                "country name must not be blank".to_string(),
            ));
        }
        self.ensure_name_available(&name)?;

        let country = Country::new(name);
        self.repo.create_country(&country)?;
        Ok(country)
    }

    /// Replaces the mutable fields of one country.
    pub fn update_country(
        &self,
        country_id: CountryId,
        payload: &Country,
    ) -> ServiceResult<Country> {
        if payload.uuid != country_id {
            return Err(ServiceError::InvalidInput(format!(
                "payload id {} does not match target id {country_id}",
                payload.uuid
            )));
        }
        if !self.repo.country_exists(country_id)? {
            return Err(not_found(country_id));
        }
        self.repo.update_country(payload)?;
        self.repo
            .get_country(country_id)?
            .ok_or_else(|| not_found(country_id))
    }

    /// Deletes one country. Owner associations are cleared, not blocked.
    pub fn delete_country(&self, country_id: CountryId) -> ServiceResult<()> {
        if !self.repo.country_exists(country_id)? {
            return Err(not_found(country_id));
        }
        let country = self
            .repo
            .get_country(country_id)?
            .ok_or_else(|| not_found(country_id))?;
        self.repo.delete_country(&country)?;
        Ok(())
    }

    /// Loads the country wired to one owner. An unwired owner is `NotFound`.
    pub fn get_country_by_owner(&self, owner_id: OwnerId) -> ServiceResult<Country> {
        self.repo.get_country_by_owner(owner_id)?.ok_or_else(|| {
            ServiceError::NotFound(format!("no country wired for owner: {owner_id}"))
        })
    }

    fn ensure_name_available(&self, name: &str) -> ServiceResult<()> {
        let wanted = normalize_name(name);
        let existing = self.repo.list_countries()?;
        if existing
            .iter()
            .any(|country| normalize_name(&country.name) == wanted)
        {
            return Err(ServiceError::Conflict(format!(
                "country already exists: `{}`",
                name.trim()
            )));
        }
        Ok(())
    }
}

fn not_found(country_id: CountryId) -> ServiceError {
    ServiceError::NotFound(format!("country not found: {country_id}"))
}
