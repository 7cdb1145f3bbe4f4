//! Artist routes

use std::sync::Arc;

use axum::{
    extract::State,
    response::Redirect,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::{genre_names, Schedule, SearchPage};
use crate::db::repos::{Artist, ArtistRepo, ArtistShow, ArtistSummary, GenreRepo, ShowRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{EntityId, SubmittedForm};
use crate::http::server::AppState;
use crate::http::view::{self, templates, Flash, View};
use crate::models::{ArtistForm, SearchForm};

#[derive(Debug, Serialize)]
pub struct ArtistIndex {
    pub artists: Vec<ArtistSummary>,
}

/// Artist detail page context
#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub schedule: Schedule<ArtistShow>,
}

#[derive(Debug, Serialize)]
pub struct ArtistEdit {
    #[serde(flatten)]
    pub artist: Artist,
    pub genres: Vec<String>,
}

/// GET /artists
async fn list_artists(State(state): State<Arc<AppState>>) -> Result<View<ArtistIndex>, ApiError> {
    let artists = ArtistRepo::new(&state.pool).list().await?;
    Ok(View::new(templates::ARTISTS, ArtistIndex { artists }))
}

/// POST /artists/search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    SubmittedForm(form): SubmittedForm<SearchForm>,
) -> Result<View<SearchPage>, ApiError> {
    let data = ArtistRepo::new(&state.pool)
        .search(&form.search_term, Utc::now())
        .await?;
    Ok(View::new(
        templates::SEARCH_ARTISTS,
        SearchPage::new(form.search_term, data),
    ))
}

/// GET /artists/{id}
async fn show_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<View<ArtistDetail>, ApiError> {
    let artist = ArtistRepo::new(&state.pool).get(id).await?;
    let genres = GenreRepo::new(&state.pool).for_artist(id).await?;
    let shows = ShowRepo::new(&state.pool).for_artist(id, Utc::now()).await?;

    Ok(View::new(
        templates::SHOW_ARTIST,
        ArtistDetail {
            artist,
            genres: genre_names(genres),
            schedule: shows.into(),
        },
    ))
}

/// GET /artists/create
async fn create_artist_form() -> View<()> {
    View::new(templates::NEW_ARTIST, ())
}

/// POST /artists/create
async fn create_artist_submission(
    State(state): State<Arc<AppState>>,
    SubmittedForm(form): SubmittedForm<ArtistForm>,
) -> View<()> {
    let flash = match ArtistRepo::new(&state.pool).create(&form).await {
        Ok(id) => {
            info!(artist_id = id, name = %form.name, "artist listed");
            Flash::success(format!("Artist {} was successfully listed!", form.name))
        }
        Err(e) => {
            warn!(name = %form.name, error = %e, "artist creation failed");
            Flash::error(format!(
                "An error occurred. Artist {} could not be listed.",
                form.name
            ))
        }
    };

    view::home().with_flash(flash)
}

/// GET /artists/{id}/edit
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<View<ArtistEdit>, ApiError> {
    let artist = ArtistRepo::new(&state.pool).get(id).await?;
    let genres = GenreRepo::new(&state.pool).for_artist(id).await?;
    Ok(View::new(
        templates::EDIT_ARTIST,
        ArtistEdit {
            artist,
            genres: genre_names(genres),
        },
    ))
}

/// POST /artists/{id}/edit
///
/// The submission is validated but not persisted.
async fn edit_artist_submission(
    EntityId(id): EntityId,
    SubmittedForm(form): SubmittedForm<ArtistForm>,
) -> Redirect {
    warn!(artist_id = id, name = %form.name, "artist edits are not persisted");
    Redirect::to(&format!("/artists/{id}"))
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/{id}", get(show_artist))
        .route(
            "/artists/{id}/edit",
            get(edit_artist).post(edit_artist_submission),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::http::routes::testing::*;
    use crate::http::view::templates;

    #[tokio::test]
    async fn create_and_list_artists() {
        let (app, _pool) = setup().await;

        let (status, body) = post_form(&app, "/artists/create", GUNS_N_PETALS).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["flashes"][0]["message"],
            "Artist Guns N Petals was successfully listed!"
        );

        post_form(
            &app,
            "/artists/create",
            "name=Matt+Quevedo&city=New+York&state=NY&genres=Jazz",
        )
        .await;

        let (status, body) = get(&app, "/artists").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"], templates::ARTISTS);
        let artists = body["data"]["artists"].as_array().unwrap();
        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0]["name"], "Guns N Petals");
        assert_eq!(artists[1]["name"], "Matt Quevedo");
    }

    #[tokio::test]
    async fn search_reports_upcoming_counts() {
        let (app, _pool) = setup().await;
        post_form(&app, "/venues/create", MUSICAL_HOP).await;
        post_form(&app, "/artists/create", GUNS_N_PETALS).await;
        post_form(
            &app,
            "/shows/create",
            "artist_id=1&venue_id=1&start_time=2099-06-15+20%3A00%3A00",
        )
        .await;

        let (status, body) = post_form(&app, "/artists/search", "search_term=PETAL").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["results"]["count"], 1);
        assert_eq!(body["data"]["results"]["data"][0]["num_upcoming_shows"], 1);

        let (_, body) = post_form(&app, "/artists/search", "search_term=100%25").await;
        assert_eq!(body["data"]["results"]["count"], 0);
    }

    #[tokio::test]
    async fn detail_splits_shows() {
        let (app, _pool) = setup().await;
        post_form(&app, "/venues/create", MUSICAL_HOP).await;
        post_form(&app, "/artists/create", GUNS_N_PETALS).await;
        post_form(
            &app,
            "/shows/create",
            "artist_id=1&venue_id=1&start_time=2019-05-21T21%3A30%3A00.000Z",
        )
        .await;
        post_form(
            &app,
            "/shows/create",
            "artist_id=1&venue_id=1&start_time=2099-06-15+20%3A00",
        )
        .await;

        let (status, body) = get(&app, "/artists/1").await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["genres"], serde_json::json!(["Rock n Roll"]));
        assert_eq!(data["past_shows_count"], 1);
        assert_eq!(data["upcoming_shows_count"], 1);
        assert_eq!(data["past_shows"][0]["venue_name"], "The Musical Hop");
        assert_eq!(data["upcoming_shows"][0]["venue_id"], 1);
    }

    #[tokio::test]
    async fn missing_artist_is_404() {
        let (app, _pool) = setup().await;
        let (status, _) = get(&app, "/artists/7").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get(&app, "/artists/7/edit").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_submission_requires_valid_form() {
        let (app, _pool) = setup().await;
        post_form(&app, "/artists/create", GUNS_N_PETALS).await;

        let (status, body) = post_form(&app, "/artists/1/edit", "name=&city=X&state=Y").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["data"]["field"], "name");
    }
}
