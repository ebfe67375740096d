//! Core domain logic for the pokemon review catalog.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryId};
pub use model::country::{Country, CountryId};
pub use model::owner::{Owner, OwnerId};
pub use model::pokemon::{Pokemon, PokemonId};
pub use model::review::{Review, ReviewId};
pub use model::reviewer::{Reviewer, ReviewerId};
pub use model::ModelValidationError;
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::country_repo::{CountryRepository, SqliteCountryRepository};
pub use repo::owner_repo::{OwnerRepository, SqliteOwnerRepository};
pub use repo::pokemon_repo::{PokemonRepository, SqlitePokemonRepository};
pub use repo::review_repo::{ReviewRepository, SqliteReviewRepository};
pub use repo::reviewer_repo::{ReviewerRepository, SqliteReviewerRepository};
pub use repo::{RepoError, RepoResult};
pub use service::category_service::CategoryService;
pub use service::country_service::CountryService;
pub use service::owner_service::{NewOwner, OwnerService};
pub use service::pokemon_service::{NewPokemon, PokemonService};
pub use service::review_service::{NewReview, ReviewService};
pub use service::reviewer_service::ReviewerService;
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
