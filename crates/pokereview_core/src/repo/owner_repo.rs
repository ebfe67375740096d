//! Owner repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for owner records.
//! - Resolve owner-to-pokemon links through `pokemon_owners`.
//!
//! # Invariants
//! - Owner listing is deterministic:
//!   `last_name COLLATE NOCASE ASC, first_name COLLATE NOCASE ASC, uuid ASC`.
//! - Updates replace name fields only; `country_uuid` is fixed at create
//!   time and cleared by the schema when the country is deleted.

use crate::model::owner::{Owner, OwnerId};
use crate::model::pokemon::{Pokemon, PokemonId};
use crate::repo::pokemon_repo::parse_pokemon_row;
use crate::repo::{
    ensure_connection_ready, parse_uuid, RepoError, RepoResult, RequiredTable,
};
use rusqlite::{params, Connection, Row};

/// Repository interface for owner operations.
pub trait OwnerRepository {
    /// Lists all owners.
    fn list_owners(&self) -> RepoResult<Vec<Owner>>;
    /// Loads one owner by id.
    fn get_owner(&self, owner_id: OwnerId) -> RepoResult<Option<Owner>>;
    /// Returns whether one owner exists.
    fn owner_exists(&self, owner_id: OwnerId) -> RepoResult<bool>;
    /// Persists one owner (including its country wiring) and returns its id.
    fn create_owner(&self, owner: &Owner) -> RepoResult<OwnerId>;
    /// Replaces the name fields of one owner.
    fn update_owner(&self, owner: &Owner) -> RepoResult<()>;
    /// Removes one owner. Link rows are dropped by the schema.
    fn delete_owner(&self, owner: &Owner) -> RepoResult<()>;
    /// Lists pokemon linked to one owner.
    fn get_pokemon_by_owner(&self, owner_id: OwnerId) -> RepoResult<Vec<Pokemon>>;
    /// Lists owners linked to one pokemon.
    fn get_owner_of_a_pokemon(&self, pokemon_id: PokemonId) -> RepoResult<Vec<Owner>>;
}

/// SQLite-backed owner repository.
pub struct SqliteOwnerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOwnerRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                RequiredTable {
                    name: "owners",
                    columns: &[
                        "uuid",
                        "first_name",
                        "last_name",
                        "country_uuid",
                        "created_at",
                        "updated_at",
                    ],
                },
                RequiredTable {
                    name: "pokemon_owners",
                    columns: &["pokemon_uuid", "owner_uuid"],
                },
            ],
        )?;
        Ok(Self { conn })
    }
}

impl OwnerRepository for SqliteOwnerRepository<'_> {
    fn list_owners(&self) -> RepoResult<Vec<Owner>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, first_name, last_name, country_uuid
             FROM owners
             ORDER BY last_name COLLATE NOCASE ASC,
                      first_name COLLATE NOCASE ASC,
                      uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_owner_row(row)?);
        }
        Ok(items)
    }

    fn get_owner(&self, owner_id: OwnerId) -> RepoResult<Option<Owner>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, first_name, last_name, country_uuid
             FROM owners
             WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([owner_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_owner_row(row)?));
        }
        Ok(None)
    }

    fn owner_exists(&self, owner_id: OwnerId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM owners
                WHERE uuid = ?1
            );",
            [owner_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn create_owner(&self, owner: &Owner) -> RepoResult<OwnerId> {
        self.conn.execute(
            "INSERT INTO owners (uuid, first_name, last_name, country_uuid)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                owner.uuid.to_string(),
                owner.first_name,
                owner.last_name,
                owner.country_uuid.map(|value| value.to_string()),
            ],
        )?;
        Ok(owner.uuid)
    }

    fn update_owner(&self, owner: &Owner) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE owners
             SET first_name = ?2,
                 last_name = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![owner.uuid.to_string(), owner.first_name, owner.last_name],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(owner.uuid));
        }
        Ok(())
    }

    fn delete_owner(&self, owner: &Owner) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM owners WHERE uuid = ?1;",
            [owner.uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(owner.uuid));
        }
        Ok(())
    }

    fn get_pokemon_by_owner(&self, owner_id: OwnerId) -> RepoResult<Vec<Pokemon>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                p.uuid AS uuid,
                p.name AS name,
                p.birth_date AS birth_date
             FROM pokemon p
             INNER JOIN pokemon_owners po ON po.pokemon_uuid = p.uuid
             WHERE po.owner_uuid = ?1
             ORDER BY p.name COLLATE NOCASE ASC, p.uuid ASC;",
        )?;
        let mut rows = stmt.query([owner_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_pokemon_row(row)?);
        }
        Ok(items)
    }

    fn get_owner_of_a_pokemon(&self, pokemon_id: PokemonId) -> RepoResult<Vec<Owner>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                o.uuid AS uuid,
                o.first_name AS first_name,
                o.last_name AS last_name,
                o.country_uuid AS country_uuid
             FROM owners o
             INNER JOIN pokemon_owners po ON po.owner_uuid = o.uuid
             WHERE po.pokemon_uuid = ?1
             ORDER BY o.last_name COLLATE NOCASE ASC,
                      o.first_name COLLATE NOCASE ASC,
                      o.uuid ASC;",
        )?;
        let mut rows = stmt.query([pokemon_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_owner_row(row)?);
        }
        Ok(items)
    }
}

fn parse_owner_row(row: &Row<'_>) -> RepoResult<Owner> {
    let uuid_text: String = row.get("uuid")?;
    let country_uuid = row
        .get::<_, Option<String>>("country_uuid")?
        .map(|value| parse_uuid(&value, "owners.country_uuid"))
        .transpose()?;
    Ok(Owner {
        uuid: parse_uuid(&uuid_text, "owners.uuid")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        country_uuid,
    })
}
