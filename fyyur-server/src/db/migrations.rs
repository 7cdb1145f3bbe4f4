//! Schema migrations for the directory tables
//!
//! Every statement is idempotent, so running on each startup is safe.

use sqlx::SqlitePool;

const TABLES: &[(&str, &str)] = &[
    (
        "venues",
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            address TEXT NOT NULL,
            phone TEXT,
            website TEXT,
            image_link TEXT,
            facebook_link TEXT,
            seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description TEXT
        )
        "#,
    ),
    (
        "artists",
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            phone TEXT,
            website TEXT,
            facebook_link TEXT,
            seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description TEXT,
            image_link TEXT
        )
        "#,
    ),
    (
        "genres",
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        "#,
    ),
    (
        "shows",
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            venue_id INTEGER NOT NULL REFERENCES venues(id),
            artist_id INTEGER NOT NULL REFERENCES artists(id),
            start_time TEXT NOT NULL
        )
        "#,
    ),
    (
        "venue_genres",
        r#"
        CREATE TABLE IF NOT EXISTS venue_genres (
            venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
            genre_id INTEGER NOT NULL REFERENCES genres(id) ON DELETE CASCADE,
            PRIMARY KEY (venue_id, genre_id)
        )
        "#,
    ),
    (
        "artist_genres",
        r#"
        CREATE TABLE IF NOT EXISTS artist_genres (
            artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
            genre_id INTEGER NOT NULL REFERENCES genres(id) ON DELETE CASCADE,
            PRIMARY KEY (artist_id, genre_id)
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_venues_area ON venues(state, city)",
    "CREATE INDEX IF NOT EXISTS idx_genres_name ON genres(name)",
    "CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id)",
    "CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id)",
    "CREATE INDEX IF NOT EXISTS idx_shows_start ON shows(start_time)",
];

/// Run all directory migrations
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running directory migrations...");

    for (table, ddl) in TABLES {
        tracing::debug!(table, "ensuring table");
        sqlx::query(ddl).execute(pool).await?;
    }

    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!("Directory migrations complete");
    Ok(())
}
