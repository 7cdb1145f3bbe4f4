//! Show repository and schedule aggregation
//!
//! A show is upcoming iff `start_time >= now`, otherwise past. Splits are
//! computed from a single ordered fetch so every show lands in exactly one
//! bucket for a given `now`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::DbError;
use crate::models::ShowForm;

/// Id, name and upcoming show count; used by area listings and search results
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Show on a venue's schedule, with the performing artist resolved
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Show on an artist's schedule, with the hosting venue resolved
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Row of the flat show listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Anything with a start time.
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

/// Shows partitioned into upcoming and past relative to a fixed instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowSplit<T> {
    pub upcoming: Vec<T>,
    pub past: Vec<T>,
}

impl<T: Scheduled> ShowSplit<T> {
    /// Partition `shows`, keeping their relative order in both buckets.
    pub fn partition(shows: Vec<T>, now: DateTime<Utc>) -> Self {
        let (upcoming, past) = shows.into_iter().partition(|s| s.start_time() >= now);
        Self { upcoming, past }
    }
}

impl<T> ShowSplit<T> {
    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn past_count(&self) -> usize {
        self.past.len()
    }
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a show (atomic).
    ///
    /// An unknown venue or artist id fails the foreign key check and the
    /// transaction is discarded.
    pub async fn create(&self, form: &ShowForm) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;
        let id = Self::insert(&mut tx, form).await?;
        tx.commit().await?;
        Ok(id)
    }

    /// Insert on the caller's connection, joining its transaction.
    pub(crate) async fn insert(
        conn: &mut SqliteConnection,
        form: &ShowForm,
    ) -> Result<i64, DbError> {
        let id = sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
            .bind(form.venue_id)
            .bind(form.artist_id)
            .bind(form.start_time)
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();

        Ok(id)
    }

    /// Every show with venue and artist names resolved, ordered by start time.
    pub async fn list(&self) -> Result<Vec<ShowListing>, DbError> {
        let shows = sqlx::query_as(
            r#"
            SELECT
                s.id,
                s.venue_id,
                v.name AS venue_name,
                s.artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time, s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(shows)
    }

    /// A venue's schedule split around `now`.
    pub async fn for_venue(
        &self,
        venue_id: i64,
        now: DateTime<Utc>,
    ) -> Result<ShowSplit<VenueShow>, DbError> {
        let shows = sqlx::query_as(
            r#"
            SELECT
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = ?
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(venue_id)
        .fetch_all(self.pool)
        .await?;
        Ok(ShowSplit::partition(shows, now))
    }

    /// An artist's schedule split around `now`.
    pub async fn for_artist(
        &self,
        artist_id: i64,
        now: DateTime<Utc>,
    ) -> Result<ShowSplit<ArtistShow>, DbError> {
        let shows = sqlx::query_as(
            r#"
            SELECT
                v.id AS venue_id,
                v.name AS venue_name,
                v.image_link AS venue_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = ?
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(artist_id)
        .fetch_all(self.pool)
        .await?;
        Ok(ShowSplit::partition(shows, now))
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shows")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn venue_show(start_time: DateTime<Utc>) -> VenueShow {
        VenueShow {
            artist_id: 1,
            artist_name: "Guns N Petals".into(),
            artist_image_link: None,
            start_time,
        }
    }

    #[test]
    fn boundary_show_is_upcoming() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
        let split = ShowSplit::partition(
            vec![
                venue_show(now - Duration::seconds(1)),
                venue_show(now),
                venue_show(now + Duration::days(3)),
            ],
            now,
        );
        assert_eq!(split.past_count(), 1);
        assert_eq!(split.upcoming_count(), 2);
        assert_eq!(split.upcoming[0].start_time, now);
    }

    #[test]
    fn counts_sum_to_total() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let shows: Vec<_> = (-5..7)
            .map(|d| venue_show(now + Duration::days(d)))
            .collect();
        let total = shows.len();
        let split = ShowSplit::partition(shows, now);
        assert_eq!(split.past_count() + split.upcoming_count(), total);
    }
}
