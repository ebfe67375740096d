//! Reviewer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for reviewer records.
//! - Resolve the reviews written by one reviewer.
//!
//! # Invariants
//! - Reviewer listing is deterministic:
//!   `last_name COLLATE NOCASE ASC, first_name COLLATE NOCASE ASC, uuid ASC`.
//! - Deleting a reviewer removes their reviews through the schema.

use crate::model::review::Review;
use crate::model::reviewer::{Reviewer, ReviewerId};
use crate::repo::review_repo::parse_review_row;
use crate::repo::{
    ensure_connection_ready, parse_uuid, RepoError, RepoResult, RequiredTable,
};
use rusqlite::{params, Connection, Row};

/// Repository interface for reviewer operations.
pub trait ReviewerRepository {
    /// Lists all reviewers.
    fn list_reviewers(&self) -> RepoResult<Vec<Reviewer>>;
    /// Loads one reviewer by id.
    fn get_reviewer(&self, reviewer_id: ReviewerId) -> RepoResult<Option<Reviewer>>;
    /// Returns whether one reviewer exists.
    fn reviewer_exists(&self, reviewer_id: ReviewerId) -> RepoResult<bool>;
    /// Persists one reviewer and returns its stable id.
    fn create_reviewer(&self, reviewer: &Reviewer) -> RepoResult<ReviewerId>;
    /// Replaces the mutable fields of one reviewer.
    fn update_reviewer(&self, reviewer: &Reviewer) -> RepoResult<()>;
    /// Removes one reviewer. Their reviews are dropped by the schema.
    fn delete_reviewer(&self, reviewer: &Reviewer) -> RepoResult<()>;
    /// Lists reviews written by one reviewer.
    fn get_reviews_by_reviewer(&self, reviewer_id: ReviewerId) -> RepoResult<Vec<Review>>;
}

/// SQLite-backed reviewer repository.
pub struct SqliteReviewerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewerRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                RequiredTable {
                    name: "reviewers",
                    columns: &["uuid", "first_name", "last_name", "created_at", "updated_at"],
                },
                RequiredTable {
                    name: "reviews",
                    columns: &["uuid", "reviewer_uuid"],
                },
            ],
        )?;
        Ok(Self { conn })
    }
}

impl ReviewerRepository for SqliteReviewerRepository<'_> {
    fn list_reviewers(&self) -> RepoResult<Vec<Reviewer>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, first_name, last_name
             FROM reviewers
             ORDER BY last_name COLLATE NOCASE ASC,
                      first_name COLLATE NOCASE ASC,
                      uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_reviewer_row(row)?);
        }
        Ok(items)
    }

    fn get_reviewer(&self, reviewer_id: ReviewerId) -> RepoResult<Option<Reviewer>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, first_name, last_name
             FROM reviewers
             WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([reviewer_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reviewer_row(row)?));
        }
        Ok(None)
    }

    fn reviewer_exists(&self, reviewer_id: ReviewerId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM reviewers
                WHERE uuid = ?1
            );",
            [reviewer_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn create_reviewer(&self, reviewer: &Reviewer) -> RepoResult<ReviewerId> {
        self.conn.execute(
            "INSERT INTO reviewers (uuid, first_name, last_name) VALUES (?1, ?2, ?3);",
            params![
                reviewer.uuid.to_string(),
                reviewer.first_name,
                reviewer.last_name,
            ],
        )?;
        Ok(reviewer.uuid)
    }

    fn update_reviewer(&self, reviewer: &Reviewer) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reviewers
             SET first_name = ?2,
                 last_name = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                reviewer.uuid.to_string(),
                reviewer.first_name,
                reviewer.last_name,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(reviewer.uuid));
        }
        Ok(())
    }

    fn delete_reviewer(&self, reviewer: &Reviewer) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM reviewers WHERE uuid = ?1;",
            [reviewer.uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(reviewer.uuid));
        }
        Ok(())
    }

    fn get_reviews_by_reviewer(&self, reviewer_id: ReviewerId) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, title, text, rating, pokemon_uuid, reviewer_uuid
             FROM reviews
             WHERE reviewer_uuid = ?1
             ORDER BY created_at ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([reviewer_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_review_row(row)?);
        }
        Ok(items)
    }
}

fn parse_reviewer_row(row: &Row<'_>) -> RepoResult<Reviewer> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Reviewer {
        uuid: parse_uuid(&uuid_text, "reviewers.uuid")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
    })
}
