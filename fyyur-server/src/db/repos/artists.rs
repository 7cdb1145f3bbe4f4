//! Artist repository
//!
//! Mirrors the venue repository: atomic creation with genres, listing,
//! and case-insensitive search with upcoming show counts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::genres::resolve_genres;
use super::shows::EntitySummary;
use super::{name_matches, DbError};
use crate::models::ArtistForm;

/// Artist record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

/// Artist id and name for the index page
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
}

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an artist with its genres (atomic).
    pub async fn create(&self, form: &ArtistForm) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;
        let id = Self::insert(&mut tx, form).await?;
        tx.commit().await?;
        Ok(id)
    }

    /// Insert on the caller's connection, joining its transaction.
    pub(crate) async fn insert(
        conn: &mut SqliteConnection,
        form: &ArtistForm,
    ) -> Result<i64, DbError> {
        let genres = resolve_genres(conn, &form.genres).await?;

        let id = sqlx::query(
            r#"
            INSERT INTO artists (
                name, city, state, phone, website, facebook_link,
                seeking_venue, seeking_description, image_link
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&form.name)
        .bind(&form.city)
        .bind(&form.state)
        .bind(form.phone.as_deref())
        .bind(form.website.as_deref())
        .bind(form.facebook_link.as_deref())
        .bind(form.seeking_venue)
        .bind(form.seeking_description.as_deref())
        .bind(form.image_link.as_deref())
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        for genre in &genres {
            sqlx::query("INSERT INTO artist_genres (artist_id, genre_id) VALUES (?, ?)")
                .bind(id)
                .bind(genre.id)
                .execute(&mut *conn)
                .await?;
        }

        Ok(id)
    }

    /// Get a single artist by id.
    pub async fn get(&self, id: i64) -> Result<Artist, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, name, city, state, phone, website, facebook_link,
                   seeking_venue, seeking_description, image_link
            FROM artists
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "artist",
            id: id.to_string(),
        })
    }

    /// Every artist's id and name, ordered by name.
    pub async fn list(&self) -> Result<Vec<ArtistSummary>, DbError> {
        let artists = sqlx::query_as("SELECT id, name FROM artists ORDER BY name, id")
            .fetch_all(self.pool)
            .await?;
        Ok(artists)
    }

    /// Case-insensitive substring search on name.
    pub async fn search(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<EntitySummary>, DbError> {
        let rows: Vec<EntitySummary> = sqlx::query_as(
            r#"
            SELECT
                a.id,
                a.name,
                COUNT(s.id) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id AND s.start_time >= ?
            GROUP BY a.id, a.name
            ORDER BY a.name, a.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter(|row| name_matches(&row.name, term))
            .collect())
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artists")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::{GenreRepo, ShowRepo, VenueRepo};
    use crate::db::{memory_pool, migrations};
    use crate::models::{ShowForm, VenueForm};
    use chrono::{Duration, TimeZone};

    async fn setup() -> SqlitePool {
        let pool = memory_pool().await.unwrap();
        migrations::run(&pool).await.unwrap();
        pool
    }

    fn artist(name: &str, genres: &[&str]) -> ArtistForm {
        ArtistForm {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("326-123-5000".to_string()),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            facebook_link: None,
            website: None,
            image_link: None,
            seeking_venue: true,
            seeking_description: Some("Looking for shows".to_string()),
        }
    }

    #[tokio::test]
    async fn create_links_genres() {
        let pool = setup().await;
        let repo = ArtistRepo::new(&pool);

        let id = repo
            .create(&artist("The Wild Sax Band", &["Jazz", "Classical"]))
            .await
            .unwrap();
        let stored = repo.get(id).await.unwrap();
        assert!(stored.seeking_venue);
        assert_eq!(stored.phone.as_deref(), Some("326-123-5000"));

        let genres = GenreRepo::new(&pool).for_artist(id).await.unwrap();
        let names: Vec<_> = genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Jazz", "Classical"]);
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let pool = setup().await;
        let repo = ArtistRepo::new(&pool);
        repo.create(&artist("Matt Quevedo", &[])).await.unwrap();
        repo.create(&artist("Guns N Petals", &[])).await.unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, ["Guns N Petals", "Matt Quevedo"]);
        assert!(matches!(
            repo.get(99).await,
            Err(DbError::NotFound { resource: "artist", .. })
        ));
    }

    #[tokio::test]
    async fn search_counts_upcoming_shows() {
        let pool = setup().await;
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let repo = ArtistRepo::new(&pool);

        let petals = repo.create(&artist("Guns N Petals", &[])).await.unwrap();
        repo.create(&artist("Matt Quevedo", &[])).await.unwrap();

        let venue_id = VenueRepo::new(&pool)
            .create(&VenueForm {
                name: "The Musical Hop".to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                address: "1015 Folsom Street".to_string(),
                phone: None,
                genres: vec![],
                facebook_link: None,
                website: None,
                image_link: None,
                seeking_talent: false,
                seeking_description: None,
            })
            .await
            .unwrap();

        let shows = ShowRepo::new(&pool);
        for offset in [-10, 5, 12] {
            shows
                .create(&ShowForm {
                    artist_id: petals,
                    venue_id,
                    start_time: now + Duration::days(offset),
                })
                .await
                .unwrap();
        }

        let hits = repo.search("a", now).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Guns N Petals");
        assert_eq!(hits[0].num_upcoming_shows, 2);
        assert_eq!(hits[1].num_upcoming_shows, 0);
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let pool = setup().await;
        let repo = ArtistRepo::new(&pool);
        repo.create(&artist("Óscar Ñúñez Trío", &[])).await.unwrap();

        let now = Utc::now();
        assert_eq!(repo.search("óscar", now).await.unwrap().len(), 1);
        assert_eq!(repo.search("ÑÚÑEZ", now).await.unwrap().len(), 1);
        assert_eq!(repo.search("trío", now).await.unwrap().len(), 1);
        assert!(repo.search("oscar", now).await.unwrap().is_empty());
    }
}
