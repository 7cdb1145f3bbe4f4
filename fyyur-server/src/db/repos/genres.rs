//! Genre repository
//!
//! Genres are created lazily: a submitted name is looked up by exact,
//! case-sensitive match and inserted only when absent.

use serde::Serialize;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::DbError;

/// Genre record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Resolve submitted genre names to rows, inserting the missing ones.
///
/// Runs on the caller's connection so it joins the caller's transaction.
/// The result holds each genre once, in first-submitted order.
pub async fn resolve_genres(
    conn: &mut SqliteConnection,
    names: &[String],
) -> Result<Vec<Genre>, DbError> {
    let mut resolved: Vec<Genre> = Vec::with_capacity(names.len());

    for name in names {
        let existing: Option<Genre> =
            sqlx::query_as("SELECT id, name FROM genres WHERE name = ? ORDER BY id LIMIT 1")
                .bind(name)
                .fetch_optional(&mut *conn)
                .await?;

        let genre = match existing {
            Some(genre) => genre,
            None => {
                let id = sqlx::query("INSERT INTO genres (name) VALUES (?)")
                    .bind(name)
                    .execute(&mut *conn)
                    .await?
                    .last_insert_rowid();
                tracing::debug!(genre = %name, id, "created genre");
                Genre {
                    id,
                    name: name.clone(),
                }
            }
        };

        if !resolved.iter().any(|g| g.id == genre.id) {
            resolved.push(genre);
        }
    }

    Ok(resolved)
}

/// Genre repository
pub struct GenreRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GenreRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All genres ordered by name.
    #[cfg(test)]
    pub async fn list(&self) -> Result<Vec<Genre>, DbError> {
        let genres = sqlx::query_as("SELECT id, name FROM genres ORDER BY name, id")
            .fetch_all(self.pool)
            .await?;
        Ok(genres)
    }

    /// Genres attached to a venue, in association order.
    pub async fn for_venue(&self, venue_id: i64) -> Result<Vec<Genre>, DbError> {
        let genres = sqlx::query_as(
            r#"
            SELECT g.id, g.name
            FROM venue_genres vg
            JOIN genres g ON g.id = vg.genre_id
            WHERE vg.venue_id = ?
            ORDER BY vg.rowid
            "#,
        )
        .bind(venue_id)
        .fetch_all(self.pool)
        .await?;
        Ok(genres)
    }

    /// Genres attached to an artist, in association order.
    pub async fn for_artist(&self, artist_id: i64) -> Result<Vec<Genre>, DbError> {
        let genres = sqlx::query_as(
            r#"
            SELECT g.id, g.name
            FROM artist_genres ag
            JOIN genres g ON g.id = ag.genre_id
            WHERE ag.artist_id = ?
            ORDER BY ag.rowid
            "#,
        )
        .bind(artist_id)
        .fetch_all(self.pool)
        .await?;
        Ok(genres)
    }
}
