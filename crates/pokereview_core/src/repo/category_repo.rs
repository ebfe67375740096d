//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for category records.
//! - Resolve category-to-pokemon links through `pokemon_categories`.
//!
//! # Invariants
//! - Category listing is deterministic: `name COLLATE NOCASE ASC, uuid ASC`.
//! - Deleting a category drops its link rows, never the linked pokemon.

use crate::model::category::{Category, CategoryId};
use crate::model::pokemon::Pokemon;
use crate::repo::pokemon_repo::parse_pokemon_row;
use crate::repo::{
    ensure_connection_ready, parse_uuid, RepoError, RepoResult, RequiredTable,
};
use rusqlite::{params, Connection, Row};

/// Repository interface for category operations.
pub trait CategoryRepository {
    /// Lists all categories.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Loads one category by id.
    fn get_category(&self, category_id: CategoryId) -> RepoResult<Option<Category>>;
    /// Returns whether one category exists.
    fn category_exists(&self, category_id: CategoryId) -> RepoResult<bool>;
    /// Persists one category and returns its stable id.
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId>;
    /// Replaces the mutable fields of one category.
    fn update_category(&self, category: &Category) -> RepoResult<()>;
    /// Removes one category. Link rows are dropped by the schema.
    fn delete_category(&self, category: &Category) -> RepoResult<()>;
    /// Lists pokemon linked to one category.
    fn get_pokemon_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Pokemon>>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                RequiredTable {
                    name: "categories",
                    columns: &["uuid", "name", "created_at", "updated_at"],
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

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name
             FROM categories
             ORDER BY name COLLATE NOCASE ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_category_row(row)?);
        }
        Ok(items)
    }

    fn get_category(&self, category_id: CategoryId) -> RepoResult<Option<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name
             FROM categories
             WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([category_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }
        Ok(None)
    }

    fn category_exists(&self, category_id: CategoryId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM categories
                WHERE uuid = ?1
            );",
            [category_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn create_category(&self, category: &Category) -> RepoResult<CategoryId> {
        self.conn.execute(
            "INSERT INTO categories (uuid, name) VALUES (?1, ?2);",
            params![category.uuid.to_string(), category.name],
        )?;
        Ok(category.uuid)
    }

    fn update_category(&self, category: &Category) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE categories
             SET name = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![category.uuid.to_string(), category.name],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(category.uuid));
        }
        Ok(())
    }

    fn delete_category(&self, category: &Category) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM categories WHERE uuid = ?1;",
            [category.uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(category.uuid));
        }
        Ok(())
    }

    fn get_pokemon_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Pokemon>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                p.uuid AS uuid,
                p.name AS name,
                p.birth_date AS birth_date
             FROM pokemon p
             INNER JOIN pokemon_categories pc ON pc.pokemon_uuid = p.uuid
             WHERE pc.category_uuid = ?1
             ORDER BY p.name COLLATE NOCASE ASC, p.uuid ASC;",
        )?;
        let mut rows = stmt.query([category_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_pokemon_row(row)?);
        }
        Ok(items)
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Category {
        uuid: parse_uuid(&uuid_text, "categories.uuid")?,
        name: row.get("name")?,
    })
}
