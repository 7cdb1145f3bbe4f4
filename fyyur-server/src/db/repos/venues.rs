//! Venue repository
//!
//! Handles venue CRUD with:
//! - Atomic creation with genre resolution (transaction)
//! - Area listing with upcoming show counts (LEFT JOIN, no N+1)
//! - Case-insensitive name search

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::genres::resolve_genres;
use super::shows::EntitySummary;
use super::{name_matches, DbError};
use crate::models::VenueForm;

/// Venue record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Venues sharing a (state, city) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

#[derive(Debug, FromRow)]
struct AreaRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    num_upcoming_shows: i64,
}

/// Fold rows already ordered by (state, city) into area groups.
///
/// Adjacent rows with the same pair share a group, so a pair appears once
/// as long as the input is sorted.
pub fn group_by_area<I>(rows: I) -> Vec<VenueArea>
where
    I: IntoIterator<Item = (String, String, EntitySummary)>,
{
    let mut areas: Vec<VenueArea> = Vec::new();
    for (state, city, venue) in rows {
        match areas.last_mut() {
            Some(area) if area.state == state && area.city == city => area.venues.push(venue),
            _ => areas.push(VenueArea {
                city,
                state,
                venues: vec![venue],
            }),
        }
    }
    areas
}

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a venue with its genres (atomic).
    ///
    /// Genre rows created for this submission are discarded together with
    /// the venue if any later statement fails.
    pub async fn create(&self, form: &VenueForm) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;
        let id = Self::insert(&mut tx, form).await?;
        tx.commit().await?;
        Ok(id)
    }

    /// Insert on the caller's connection, joining its transaction.
    pub(crate) async fn insert(
        conn: &mut SqliteConnection,
        form: &VenueForm,
    ) -> Result<i64, DbError> {
        let genres = resolve_genres(conn, &form.genres).await?;

        let id = sqlx::query(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone, website, image_link,
                facebook_link, seeking_talent, seeking_description
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&form.name)
        .bind(&form.city)
        .bind(&form.state)
        .bind(&form.address)
        .bind(form.phone.as_deref())
        .bind(form.website.as_deref())
        .bind(form.image_link.as_deref())
        .bind(form.facebook_link.as_deref())
        .bind(form.seeking_talent)
        .bind(form.seeking_description.as_deref())
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        for genre in &genres {
            sqlx::query("INSERT INTO venue_genres (venue_id, genre_id) VALUES (?, ?)")
                .bind(id)
                .bind(genre.id)
                .execute(&mut *conn)
                .await?;
        }

        Ok(id)
    }

    /// Get a single venue by id.
    pub async fn get(&self, id: i64) -> Result<Venue, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, name, city, state, address, phone, website, image_link,
                   facebook_link, seeking_talent, seeking_description
            FROM venues
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "venue",
            id: id.to_string(),
        })
    }

    /// All venues grouped by (state, city) with upcoming show counts.
    ///
    /// The show filter sits in the JOIN condition so venues without
    /// upcoming shows survive the outer join with a count of 0.
    pub async fn list_by_area(&self, now: DateTime<Utc>) -> Result<Vec<VenueArea>, DbError> {
        let rows: Vec<AreaRow> = sqlx::query_as(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time >= ?
            GROUP BY v.id, v.name, v.city, v.state
            ORDER BY v.state, v.city, v.name, v.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(group_by_area(rows.into_iter().map(|r| {
            (
                r.state,
                r.city,
                EntitySummary {
                    id: r.id,
                    name: r.name,
                    num_upcoming_shows: r.num_upcoming_shows,
                },
            )
        })))
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
                v.id,
                v.name,
                COUNT(s.id) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time >= ?
            GROUP BY v.id, v.name
            ORDER BY v.name, v.id
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
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM venues")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
