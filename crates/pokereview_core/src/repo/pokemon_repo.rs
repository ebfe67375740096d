//! Pokemon repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for pokemon records.
//! - Wire owner/category link rows atomically at create time.
//!
//! # Invariants
//! - Pokemon listing is deterministic: `name COLLATE NOCASE ASC, uuid ASC`.
//! - `create_pokemon` persists the record and both link rows in one
//!   transaction; a failed link insert leaves no partial record behind.

use crate::model::category::CategoryId;
use crate::model::owner::OwnerId;
use crate::model::pokemon::{Pokemon, PokemonId};
use crate::repo::{
    ensure_connection_ready, parse_uuid, RepoError, RepoResult, RequiredTable,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

/// Repository interface for pokemon operations.
pub trait PokemonRepository {
    /// Lists all pokemon.
    fn list_pokemon(&self) -> RepoResult<Vec<Pokemon>>;
    /// Loads one pokemon by id.
    fn get_pokemon(&self, pokemon_id: PokemonId) -> RepoResult<Option<Pokemon>>;
    /// Returns whether one pokemon exists.
    fn pokemon_exists(&self, pokemon_id: PokemonId) -> RepoResult<bool>;
    /// Persists one pokemon wired to one owner and one category.
    fn create_pokemon(
        &self,
        pokemon: &Pokemon,
        owner_id: OwnerId,
        category_id: CategoryId,
    ) -> RepoResult<PokemonId>;
    /// Replaces the mutable fields of one pokemon.
    fn update_pokemon(&self, pokemon: &Pokemon) -> RepoResult<()>;
    /// Removes one pokemon. Link rows and reviews are dropped by the schema.
    fn delete_pokemon(&self, pokemon: &Pokemon) -> RepoResult<()>;
}

/// SQLite-backed pokemon repository.
pub struct SqlitePokemonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePokemonRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                RequiredTable {
                    name: "pokemon",
                    columns: &["uuid", "name", "birth_date", "created_at", "updated_at"],
                },
                RequiredTable {
                    name: "pokemon_owners",
                    columns: &["pokemon_uuid", "owner_uuid"],
                },
                RequiredTable {
                    name: "pokemon_categories",
                    columns: &["pokemon_uuid", "category_uuid"],
                },
            ],
        )?;
        Ok(Self { conn })
    }
}

impl PokemonRepository for SqlitePokemonRepository<'_> {
    fn list_pokemon(&self) -> RepoResult<Vec<Pokemon>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, birth_date
             FROM pokemon
             ORDER BY name COLLATE NOCASE ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_pokemon_row(row)?);
        }
        Ok(items)
    }

    fn get_pokemon(&self, pokemon_id: PokemonId) -> RepoResult<Option<Pokemon>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, birth_date
             FROM pokemon
             WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([pokemon_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_pokemon_row(row)?));
        }
        Ok(None)
    }

    fn pokemon_exists(&self, pokemon_id: PokemonId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM pokemon
                WHERE uuid = ?1
            );",
            [pokemon_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn create_pokemon(
        &self,
        pokemon: &Pokemon,
        owner_id: OwnerId,
        category_id: CategoryId,
    ) -> RepoResult<PokemonId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO pokemon (uuid, name, birth_date) VALUES (?1, ?2, ?3);",
            params![pokemon.uuid.to_string(), pokemon.name, pokemon.birth_date],
        )?;
        tx.execute(
            "INSERT INTO pokemon_owners (pokemon_uuid, owner_uuid) VALUES (?1, ?2);",
            params![pokemon.uuid.to_string(), owner_id.to_string()],
        )?;
        tx.execute(
            "INSERT INTO pokemon_categories (pokemon_uuid, category_uuid) VALUES (?1, ?2);",
            params![pokemon.uuid.to_string(), category_id.to_string()],
        )?;
        tx.commit()?;
        Ok(pokemon.uuid)
    }

    fn update_pokemon(&self, pokemon: &Pokemon) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE pokemon
             SET name = ?2,
                 birth_date = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![pokemon.uuid.to_string(), pokemon.name, pokemon.birth_date],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(pokemon.uuid));
        }
        Ok(())
    }

    fn delete_pokemon(&self, pokemon: &Pokemon) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM pokemon WHERE uuid = ?1;",
            [pokemon.uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(pokemon.uuid));
        }
        Ok(())
    }
}

pub(crate) fn parse_pokemon_row(row: &Row<'_>) -> RepoResult<Pokemon> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Pokemon {
        uuid: parse_uuid(&uuid_text, "pokemon.uuid")?,
        name: row.get("name")?,
        birth_date: row.get("birth_date")?,
    })
}
