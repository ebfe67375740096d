//! Country repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for country records.
//! - Resolve the country wired to one owner.
//!
//! # Invariants
//! - Country listing is deterministic: `name COLLATE NOCASE ASC, uuid ASC`.
//! - Deleting a country clears `owners.country_uuid` instead of blocking.

use crate::model::country::{Country, CountryId};
use crate::model::owner::OwnerId;
use crate::repo::{
    ensure_connection_ready, parse_uuid, RepoError, RepoResult, RequiredTable,
};
use rusqlite::{params, Connection, Row};

/// Repository interface for country operations.
pub trait CountryRepository {
    /// Lists all countries.
    fn list_countries(&self) -> RepoResult<Vec<Country>>;
    /// Loads one country by id.
    fn get_country(&self, country_id: CountryId) -> RepoResult<Option<Country>>;
    /// Returns whether one country exists.
    fn country_exists(&self, country_id: CountryId) -> RepoResult<bool>;
    /// Persists one country and returns its stable id.
    fn create_country(&self, country: &Country) -> RepoResult<CountryId>;
    /// Replaces the mutable fields of one country.
    fn update_country(&self, country: &Country) -> RepoResult<()>;
    /// Removes one country. Owner associations are cleared by the schema.
    fn delete_country(&self, country: &Country) -> RepoResult<()>;
    /// Loads the country wired to one owner, if any.
    fn get_country_by_owner(&self, owner_id: OwnerId) -> RepoResult<Option<Country>>;
}

/// SQLite-backed country repository.
pub struct SqliteCountryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCountryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                RequiredTable {
                    name: "countries",
                    columns: &["uuid", "name", "created_at", "updated_at"],
                },
                RequiredTable {
                    name: "owners",
                    columns: &["uuid", "country_uuid"],
                },
            ],
        )?;
        Ok(Self { conn })
    }
}

impl CountryRepository for SqliteCountryRepository<'_> {
    fn list_countries(&self) -> RepoResult<Vec<Country>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name
             FROM countries
             ORDER BY name COLLATE NOCASE ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_country_row(row)?);
        }
        Ok(items)
    }

    fn get_country(&self, country_id: CountryId) -> RepoResult<Option<Country>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name
             FROM countries
             WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([country_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_country_row(row)?));
        }
        Ok(None)
    }

    fn country_exists(&self, country_id: CountryId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM countries
                WHERE uuid = ?1
            );",
            [country_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn create_country(&self, country: &Country) -> RepoResult<CountryId> {
        self.conn.execute(
            "INSERT INTO countries (uuid, name) VALUES (?1, ?2);",
            params![country.uuid.to_string(), country.name],
        )?;
        Ok(country.uuid)
    }

    fn update_country(&self, country: &Country) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE countries
             SET name = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![country.uuid.to_string(), country.name],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(country.uuid));
        }
        Ok(())
    }

    fn delete_country(&self, country: &Country) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM countries WHERE uuid = ?1;",
            [country.uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(country.uuid));
        }
        Ok(())
    }

    fn get_country_by_owner(&self, owner_id: OwnerId) -> RepoResult<Option<Country>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                c.uuid AS uuid,
                c.name AS name
             FROM countries c
             INNER JOIN owners o ON o.country_uuid = c.uuid
             WHERE o.uuid = ?1;",
        )?;
        let mut rows = stmt.query([owner_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_country_row(row)?));
        }
        Ok(None)
    }
}

fn parse_country_row(row: &Row<'_>) -> RepoResult<Country> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Country {
        uuid: parse_uuid(&uuid_text, "countries.uuid")?,
        name: row.get("name")?,
    })
}
