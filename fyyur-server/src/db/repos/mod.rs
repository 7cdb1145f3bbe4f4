//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool; handlers build one per request
//! - Upcoming/past classification takes an explicit `now`
//! - Creation runs genre resolution and inserts in one transaction

pub mod artists;
pub mod genres;
pub mod shows;
pub mod venues;

pub use artists::{Artist, ArtistRepo, ArtistSummary};
pub use genres::{resolve_genres, Genre, GenreRepo};
pub use shows::{ArtistShow, EntitySummary, ShowListing, ShowRepo, ShowSplit, VenueShow};
pub use venues::{group_by_area, Venue, VenueArea, VenueRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

/// Case-insensitive substring test on a name.
///
/// Folds with Unicode lowercase on both sides; SQLite's `UPPER`/`LIKE` only
/// fold ASCII.
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}
