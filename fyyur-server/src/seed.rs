//! Demo data for a fresh directory
//!
//! Records go through the same form validation and repositories as web
//! submissions, inside a single transaction. Seeding is skipped when any
//! venue already exists.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::db::repos::{ArtistRepo, DbError, ShowRepo, VenueRepo};
use crate::models::{ArtistForm, FormFields, FromFormFields, ShowForm, ValidationError, VenueForm};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("invalid seed record: {0}")]
    InvalidRecord(#[from] ValidationError),
}

/// What a seeding run inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
    pub skipped: bool,
}

const VENUES: &[&[(&str, &str)]] = &[
    &[
        ("name", "The Musical Hop"),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("address", "1015 Folsom Street"),
        ("phone", "123-123-1234"),
        ("genres", "Jazz"),
        ("genres", "Reggae"),
        ("genres", "Swing"),
        ("genres", "Classical"),
        ("genres", "Folk"),
        ("website", "https://www.themusicalhop.com"),
        ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
        ("seeking_talent", "y"),
        (
            "seeking_description",
            "We are on the lookout for a local artist to play every two weeks. Please call us.",
        ),
    ],
    &[
        ("name", "The Dueling Pianos Bar"),
        ("city", "New York"),
        ("state", "NY"),
        ("address", "335 Delancey Street"),
        ("phone", "914-003-1132"),
        ("genres", "Classical"),
        ("genres", "R&B"),
        ("genres", "Hip-Hop"),
        ("website", "https://www.theduelingpianos.com"),
        ("facebook_link", "https://www.facebook.com/theduelingpianos"),
    ],
    &[
        ("name", "Park Square Live Music & Coffee"),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("address", "34 Whiskey Moore Ave"),
        ("phone", "415-000-1234"),
        ("genres", "Rock n Roll"),
        ("genres", "Jazz"),
        ("genres", "Classical"),
        ("genres", "Folk"),
        ("website", "https://www.parksquarelivemusicandcoffee.com"),
        (
            "facebook_link",
            "https://www.facebook.com/ParkSquareLiveMusicAndCoffee",
        ),
    ],
];

const ARTISTS: &[&[(&str, &str)]] = &[
    &[
        ("name", "Guns N Petals"),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("phone", "326-123-5000"),
        ("genres", "Rock n Roll"),
        ("website", "https://www.gunsnpetalsband.com"),
        ("facebook_link", "https://www.facebook.com/GunsNPetals"),
        ("seeking_venue", "y"),
        (
            "seeking_description",
            "Looking for shows to perform at in the San Francisco Bay Area!",
        ),
    ],
    &[
        ("name", "Matt Quevedo"),
        ("city", "New York"),
        ("state", "NY"),
        ("phone", "300-400-5000"),
        ("genres", "Jazz"),
        ("facebook_link", "https://www.facebook.com/mattquevedo923251523"),
    ],
    &[
        ("name", "The Wild Sax Band"),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("phone", "432-325-5432"),
        ("genres", "Jazz"),
        ("genres", "Classical"),
    ],
];

/// (venue index, artist index, start time)
const SHOWS: &[(usize, usize, &str)] = &[
    (0, 0, "2019-05-21T21:30:00.000Z"),
    (2, 1, "2019-06-15T23:00:00.000Z"),
    (2, 2, "2035-04-01T20:00:00.000Z"),
    (2, 2, "2035-04-08T20:00:00.000Z"),
    (2, 2, "2035-04-15T20:00:00.000Z"),
];

fn fields(pairs: &[(&str, &str)]) -> FormFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<Vec<_>>()
        .into()
}

/// Insert the demo venues, artists and shows.
pub async fn seed(pool: &SqlitePool) -> Result<SeedReport, SeedError> {
    seed_records(pool, VENUES, ARTISTS, SHOWS).await
}

/// Insert `venues`, `artists` and `shows` in one transaction; any failing
/// record leaves the directory untouched.
async fn seed_records(
    pool: &SqlitePool,
    venues: &[&[(&str, &str)]],
    artists: &[&[(&str, &str)]],
    shows: &[(usize, usize, &str)],
) -> Result<SeedReport, SeedError> {
    if VenueRepo::new(pool).count().await? > 0 {
        info!("Directory already has venues, skipping seed");
        return Ok(SeedReport {
            skipped: true,
            ..SeedReport::default()
        });
    }

    let mut tx = pool.begin().await.map_err(DbError::from)?;

    let mut venue_ids = Vec::with_capacity(venues.len());
    for record in venues {
        let form = VenueForm::from_fields(&fields(record))?;
        venue_ids.push(VenueRepo::insert(&mut tx, &form).await?);
    }

    let mut artist_ids = Vec::with_capacity(artists.len());
    for record in artists {
        let form = ArtistForm::from_fields(&fields(record))?;
        artist_ids.push(ArtistRepo::insert(&mut tx, &form).await?);
    }

    for &(venue, artist, start_time) in shows {
        let venue_id = venue_ids[venue].to_string();
        let artist_id = artist_ids[artist].to_string();
        let form = ShowForm::from_fields(&fields(&[
            ("venue_id", venue_id.as_str()),
            ("artist_id", artist_id.as_str()),
            ("start_time", start_time),
        ]))?;
        ShowRepo::insert(&mut tx, &form).await?;
    }

    tx.commit().await.map_err(DbError::from)?;

    let report = SeedReport {
        venues: venue_ids.len(),
        artists: artist_ids.len(),
        shows: shows.len(),
        skipped: false,
    };
    info!(
        venues = report.venues,
        artists = report.artists,
        shows = report.shows,
        "Seeded demo data"
    );
    Ok(report)
}
