//! Pokemon request handling.
//!
//! # Invariants
//! - Create rejects duplicate names under trim + case-fold comparison.
//! - Owner and category references arrive out-of-band and must resolve;
//!   missing references reject the create.
//! - Updates replace `name`/`birth_date` only; links are untouched.

use crate::model::category::CategoryId;
use crate::model::owner::OwnerId;
use crate::model::pokemon::{Pokemon, PokemonId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::owner_repo::OwnerRepository;
use crate::repo::pokemon_repo::PokemonRepository;
use crate::service::{is_blank, normalize_name, ServiceError, ServiceResult};

/// Request payload for creating one pokemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPokemon {
    pub name: String,
    /// Unix epoch milliseconds.
    pub birth_date: i64,
}

/// Request-handling facade for pokemon operations.
pub struct PokemonService<P: PokemonRepository, O: OwnerRepository, C: CategoryRepository> {
    pokemon: P,
    owners: O,
    categories: C,
}

impl<P: PokemonRepository, O: OwnerRepository, C: CategoryRepository> PokemonService<P, O, C> {
    /// Creates a service using the provided repository implementations.
    pub fn new(pokemon: P, owners: O, categories: C) -> Self {
        Self {
            pokemon,
            owners,
            categories,
        }
    }

    /// Lists all pokemon. May be empty.
    pub fn list_pokemon(&self) -> ServiceResult<Vec<Pokemon>> {
        Ok(self.pokemon.list_pokemon()?)
    }

    /// Loads one pokemon by id.
    pub fn get_pokemon(&self, pokemon_id: PokemonId) -> ServiceResult<Pokemon> {
        if !self.pokemon.pokemon_exists(pokemon_id)? {
            return Err(not_found(pokemon_id));
        }
        self.pokemon
            .get_pokemon(pokemon_id)?
            .ok_or_else(|| not_found(pokemon_id))
    }

    /// Creates one pokemon wired to an existing owner and category.
    ///
    /// Rejection order: blank name, then duplicate, then missing owner,
    /// then missing category, then storage.
    pub fn create_pokemon(
        &self,
        owner_id: OwnerId,
        category_id: CategoryId,
        request: &NewPokemon,
    ) -> ServiceResult<Pokemon> {
        if is_blank(&request.name) {
            return Err(ServiceError::InvalidInput(
                "pokemon name must not be blank".to_string(),
            ));
        }
        self.ensure_name_available(&request.name)?;

        if !self.owners.owner_exists(owner_id)? {
            return Err(ServiceError::NotFound(format!(
                "owner not found: {owner_id}"
            )));
        }
        if !self.categories.category_exists(category_id)? {
            return Err(ServiceError::NotFound(format!(
                "category not found: {category_id}"
            )));
        }

        let pokemon = Pokemon::new(request.name.clone(), request.birth_date);
        self.pokemon.create_pokemon(&pokemon, owner_id, category_id)?;
        Ok(pokemon)
    }

    /// Replaces the mutable fields of one pokemon.
    pub fn update_pokemon(
        &self,
        pokemon_id: PokemonId,
        payload: &Pokemon,
    ) -> ServiceResult<Pokemon> {
        if payload.uuid != pokemon_id {
            return Err(ServiceError::InvalidInput(format!(
                "payload id {} does not match target id {pokemon_id}",
                payload.uuid
            )));
        }
        if !self.pokemon.pokemon_exists(pokemon_id)? {
            return Err(not_found(pokemon_id));
        }
        self.pokemon.update_pokemon(payload)?;
        self.pokemon
            .get_pokemon(pokemon_id)?
            .ok_or_else(|| not_found(pokemon_id))
    }

    /// Deletes one pokemon. Reviews and links are dropped with it.
    pub fn delete_pokemon(&self, pokemon_id: PokemonId) -> ServiceResult<()> {
        if !self.pokemon.pokemon_exists(pokemon_id)? {
            return Err(not_found(pokemon_id));
        }
        let pokemon = self
            .pokemon
            .get_pokemon(pokemon_id)?
            .ok_or_else(|| not_found(pokemon_id))?;
        self.pokemon.delete_pokemon(&pokemon)?;
        Ok(())
    }

    fn ensure_name_available(&self, name: &str) -> ServiceResult<()> {
        let wanted = normalize_name(name);
        let existing = self.pokemon.list_pokemon()?;
        if existing
            .iter()
            .any(|pokemon| normalize_name(&pokemon.name) == wanted)
        {
            return Err(ServiceError::Conflict(format!(
                "pokemon already exists: `{}`",
                name.trim()
            )));
        }
        Ok(())
    }
}

fn not_found(pokemon_id: PokemonId) -> ServiceError {
    ServiceError::NotFound(format!("pokemon not found: {pokemon_id}"))
}
