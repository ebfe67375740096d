//! Owner request handling.
//!
//! # Invariants
//! - Create rejects duplicate (first name, last name) pairs under trim +
//!   case-fold comparison.
//! - The country reference arrives out-of-band and must resolve; a missing
//!   country rejects the create instead of defaulting to no association.
//! - Updates replace name fields only; the country wiring is untouched.

use crate::model::country::CountryId;
use crate::model::owner::{Owner, OwnerId};
use crate::model::pokemon::{Pokemon, PokemonId};
use crate::repo::country_repo::CountryRepository;
use crate::repo::owner_repo::OwnerRepository;
use crate::service::{is_blank, normalize_name, ServiceError, ServiceResult};

/// Request payload for creating one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwner {
    pub first_name: String,
    pub last_name: String,
}

/// Request-handling facade for owner operations.
pub struct OwnerService<O: OwnerRepository, C: CountryRepository> {
    owners: O,
    countries: C,
}

impl<O: OwnerRepository, C: CountryRepository> OwnerService<O, C> {
    /// Creates a service using the provided repository implementations.
    pub fn new(owners: O, countries: C) -> Self {
        Self { owners, countries }
    }

    /// Lists all owners. May be empty.
    pub fn list_owners(&self) -> ServiceResult<Vec<Owner>> {
        Ok(self.owners.list_owners()?)
    }

    /// Loads one owner by id.
    pub fn get_owner(&self, owner_id: OwnerId) -> ServiceResult<Owner> {
        if !self.owners.owner_exists(owner_id)? {
            return Err(not_found(owner_id));
        }
        self.owners
            .get_owner(owner_id)?
            .ok_or_else(|| not_found(owner_id))
    }

    /// Creates one owner wired to an existing country.
    ///
    /// Rejection order: blank names, then duplicate pair, then missing
    /// country, then storage.
    pub fn create_owner(&self, country_id: CountryId, request: &NewOwner) -> ServiceResult<Owner> {
        if is_blank(&request.first_name) || is_blank(&request.last_name) {
            return Err(ServiceError::InvalidInput(
                "owner first and last name must not be blank".to_string(),
            ));
        }
        self.ensure_name_pair_available(&request.first_name, &request.last_name)?;

        let country = self
            .countries
            .get_country(country_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("country not found: {country_id}")))?;

        let mut owner = Owner::new(request.first_name.clone(), request.last_name.clone());
        owner.country_uuid = Some(country.uuid);
        self.owners.create_owner(&owner)?;
        Ok(owner)
    }

    /// Replaces the name fields of one owner.
    pub fn update_owner(&self, owner_id: OwnerId, payload: &Owner) -> ServiceResult<Owner> {
        if payload.uuid != owner_id {
            return Err(ServiceError::InvalidInput(format!(
                "payload id {} does not match target id {owner_id}",
                payload.uuid
            )));
        }
        if !self.owners.owner_exists(owner_id)? {
            return Err(not_found(owner_id));
        }
        self.owners.update_owner(payload)?;
        self.owners
            .get_owner(owner_id)?
            .ok_or_else(|| not_found(owner_id))
    }

    /// Deletes one owner. Pokemon links are dropped with it.
    pub fn delete_owner(&self, owner_id: OwnerId) -> ServiceResult<()> {
        if !self.owners.owner_exists(owner_id)? {
            return Err(not_found(owner_id));
        }
        let owner = self
            .owners
            .get_owner(owner_id)?
            .ok_or_else(|| not_found(owner_id))?;
        self.owners.delete_owner(&owner)?;
        Ok(())
    }

    /// Lists pokemon linked to one owner. The owner must exist.
    pub fn get_pokemon_by_owner(&self, owner_id: OwnerId) -> ServiceResult<Vec<Pokemon>> {
        if !self.owners.owner_exists(owner_id)? {
            return Err(not_found(owner_id));
        }
        Ok(self.owners.get_pokemon_by_owner(owner_id)?)
    }

    /// Lists owners linked to one pokemon. May be empty.
    pub fn get_owner_of_a_pokemon(&self, pokemon_id: PokemonId) -> ServiceResult<Vec<Owner>> {
        Ok(self.owners.get_owner_of_a_pokemon(pokemon_id)?)
    }

    fn ensure_name_pair_available(&self, first_name: &str, last_name: &str) -> ServiceResult<()> {
        let wanted_first = normalize_name(first_name);
        let wanted_last = normalize_name(last_name);
        let existing = self.owners.list_owners()?;
        if existing.iter().any(|owner| {
            normalize_name(&owner.first_name) == wanted_first
                && normalize_name(&owner.last_name) == wanted_last
        }) {
            return Err(ServiceError::Conflict(format!(
                "owner already exists: `{} {}`",
                first_name.trim(),
                last_name.trim()
            )));
        }
        Ok(())
    }
}

fn not_found(owner_id: OwnerId) -> ServiceError {
    ServiceError::NotFound(format!("owner not found: {owner_id}"))
}
