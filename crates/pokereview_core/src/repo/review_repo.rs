//! Review repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for review records.
//! - Resolve the reviews written for one pokemon.
//!
//! # Invariants
//! - Review listing is deterministic: `created_at ASC, uuid ASC`.
//! - Updates replace `title`/`text`/`rating` only; both reference columns
//!   are fixed at create time.

use crate::model::pokemon::PokemonId;
use crate::model::review::{Review, ReviewId};
use crate::repo::{
    ensure_connection_ready, parse_uuid, RepoError, RepoResult, RequiredTable,
};
use rusqlite::{params, Connection, Row};

/// Repository interface for review operations.
pub trait ReviewRepository {
    /// Lists all reviews.
    fn list_reviews(&self) -> RepoResult<Vec<Review>>;
    /// Loads one review by id.
    fn get_review(&self, review_id: ReviewId) -> RepoResult<Option<Review>>;
    /// Returns whether one review exists.
    fn review_exists(&self, review_id: ReviewId) -> RepoResult<bool>;
    /// Persists one review (including its references) and returns its id.
    fn create_review(&self, review: &Review) -> RepoResult<ReviewId>;
    /// Replaces the mutable fields of one review.
    fn update_review(&self, review: &Review) -> RepoResult<()>;
    /// Removes one review.
    fn delete_review(&self, review: &Review) -> RepoResult<()>;
    /// Lists reviews written for one pokemon.
    fn get_reviews_of_a_pokemon(&self, pokemon_id: PokemonId) -> RepoResult<Vec<Review>>;
}

/// SQLite-backed review repository.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[RequiredTable {
                name: "reviews",
                columns: &[
                    "uuid",
                    "title",
                    "text",
                    "rating",
                    "pokemon_uuid",
                    "reviewer_uuid",
                    "created_at",
                    "updated_at",
                ],
            }],
        )?;
        Ok(Self { conn })
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn list_reviews(&self) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, title, text, rating, pokemon_uuid, reviewer_uuid
             FROM reviews
             ORDER BY created_at ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_review_row(row)?);
        }
        Ok(items)
    }

    fn get_review(&self, review_id: ReviewId) -> RepoResult<Option<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, title, text, rating, pokemon_uuid, reviewer_uuid
             FROM reviews
             WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([review_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_review_row(row)?));
        }
        Ok(None)
    }

    fn review_exists(&self, review_id: ReviewId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM reviews
                WHERE uuid = ?1
            );",
            [review_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn create_review(&self, review: &Review) -> RepoResult<ReviewId> {
        self.conn.execute(
            "INSERT INTO reviews (uuid, title, text, rating, pokemon_uuid, reviewer_uuid)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                review.uuid.to_string(),
                review.title,
                review.text,
                review.rating,
                review.pokemon_uuid.to_string(),
                review.reviewer_uuid.to_string(),
            ],
        )?;
        Ok(review.uuid)
    }

    fn update_review(&self, review: &Review) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reviews
             SET title = ?2,
                 text = ?3,
                 rating = ?4,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                review.uuid.to_string(),
                review.title,
                review.text,
                review.rating,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(review.uuid));
        }
        Ok(())
    }

    fn delete_review(&self, review: &Review) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM reviews WHERE uuid = ?1;",
            [review.uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(review.uuid));
        }
        Ok(())
    }

    fn get_reviews_of_a_pokemon(&self, pokemon_id: PokemonId) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, title, text, rating, pokemon_uuid, reviewer_uuid
             FROM reviews
             WHERE pokemon_uuid = ?1
             ORDER BY created_at ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([pokemon_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_review_row(row)?);
        }
        Ok(items)
    }
}

pub(crate) fn parse_review_row(row: &Row<'_>) -> RepoResult<Review> {
    let uuid_text: String = row.get("uuid")?;
    let pokemon_uuid_text: String = row.get("pokemon_uuid")?;
    let reviewer_uuid_text: String = row.get("reviewer_uuid")?;
    Ok(Review {
        uuid: parse_uuid(&uuid_text, "reviews.uuid")?,
        title: row.get("title")?,
        text: row.get("text")?,
        rating: row.get("rating")?,
        pokemon_uuid: parse_uuid(&pokemon_uuid_text, "reviews.pokemon_uuid")?,
        reviewer_uuid: parse_uuid(&reviewer_uuid_text, "reviews.reviewer_uuid")?,
    })
}
