//! Venue routes

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::{genre_names, Schedule, SearchPage};
use crate::db::repos::{GenreRepo, ShowRepo, Venue, VenueArea, VenueRepo, VenueShow};
use crate::http::error::ApiError;
use crate::http::extractors::{EntityId, SubmittedForm};
use crate::http::server::AppState;
use crate::http::view::{self, templates, Flash, View};
use crate::models::{SearchForm, VenueForm};

#[derive(Debug, Serialize)]
pub struct VenueAreas {
    pub areas: Vec<VenueArea>,
}

/// Venue detail page context
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub schedule: Schedule<VenueShow>,
}

/// Edit form prefilled from the stored venue
#[derive(Debug, Serialize)]
pub struct VenueEdit {
    #[serde(flatten)]
    pub venue: Venue,
    pub genres: Vec<String>,
}

/// GET /venues
async fn list_venues(State(state): State<Arc<AppState>>) -> Result<View<VenueAreas>, ApiError> {
    let areas = VenueRepo::new(&state.pool).list_by_area(Utc::now()).await?;
    Ok(View::new(templates::VENUES, VenueAreas { areas }))
}

/// POST /venues/search
async fn search_venues(
    State(state): State<Arc<AppState>>,
    SubmittedForm(form): SubmittedForm<SearchForm>,
) -> Result<View<SearchPage>, ApiError> {
    let data = VenueRepo::new(&state.pool)
        .search(&form.search_term, Utc::now())
        .await?;
    Ok(View::new(
        templates::SEARCH_VENUES,
        SearchPage::new(form.search_term, data),
    ))
}

/// GET /venues/{id}
async fn show_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<View<VenueDetail>, ApiError> {
    let venue = VenueRepo::new(&state.pool).get(id).await?;
    let genres = GenreRepo::new(&state.pool).for_venue(id).await?;
    let shows = ShowRepo::new(&state.pool).for_venue(id, Utc::now()).await?;

    Ok(View::new(
        templates::SHOW_VENUE,
        VenueDetail {
            venue,
            genres: genre_names(genres),
            schedule: shows.into(),
        },
    ))
}

/// DELETE /venues/{id}
///
/// Accepted and ignored; nothing is removed.
async fn delete_venue(EntityId(id): EntityId) -> StatusCode {
    warn!(venue_id = id, "venue deletion requested; deletion is not supported");
    StatusCode::NO_CONTENT
}

/// GET /venues/create
async fn create_venue_form() -> View<()> {
    View::new(templates::NEW_VENUE, ())
}

/// POST /venues/create
async fn create_venue_submission(
    State(state): State<Arc<AppState>>,
    SubmittedForm(form): SubmittedForm<VenueForm>,
) -> View<()> {
    let flash = match VenueRepo::new(&state.pool).create(&form).await {
        Ok(id) => {
            info!(venue_id = id, name = %form.name, "venue listed");
            Flash::success(format!("Venue {} was successfully listed!", form.name))
        }
        Err(e) => {
            warn!(name = %form.name, error = %e, "venue creation failed");
            Flash::error(format!(
                "An error occurred. Venue {} could not be listed.",
                form.name
            ))
        }
    };

    view::home().with_flash(flash)
}

/// GET /venues/{id}/edit
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<View<VenueEdit>, ApiError> {
    let venue = VenueRepo::new(&state.pool).get(id).await?;
    let genres = GenreRepo::new(&state.pool).for_venue(id).await?;
    Ok(View::new(
        templates::EDIT_VENUE,
        VenueEdit {
            venue,
            genres: genre_names(genres),
        },
    ))
}

/// POST /venues/{id}/edit
///
/// The submission is validated but not persisted.
async fn edit_venue_submission(
    EntityId(id): EntityId,
    SubmittedForm(form): SubmittedForm<VenueForm>,
) -> Redirect {
    warn!(venue_id = id, name = %form.name, "venue edits are not persisted");
    Redirect::to(&format!("/venues/{id}"))
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route(
            "/venues/{id}/edit",
            get(edit_venue).post(edit_venue_submission),
        )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    use crate::db::repos::VenueRepo;
    use crate::http::routes::testing::*;
    use crate::http::view::templates;

    #[tokio::test]
    async fn create_venue_flashes_success() {
        let (app, pool) = setup().await;

        let (status, body) = post_form(&app, "/venues/create", MUSICAL_HOP).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"], templates::HOME);
        assert_eq!(body["flashes"][0]["level"], "success");
        assert_eq!(
            body["flashes"][0]["message"],
            "Venue The Musical Hop was successfully listed!"
        );
        assert_eq!(VenueRepo::new(&pool).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn venues_group_by_area() {
        let (app, _pool) = setup().await;
        post_form(&app, "/venues/create", MUSICAL_HOP).await;
        post_form(&app, "/venues/create", PARK_SQUARE).await;
        post_form(
            &app,
            "/venues/create",
            "name=The+Dueling+Pianos+Bar&city=New+York&state=NY&address=335+Delancey+Street",
        )
        .await;

        let (status, body) = get(&app, "/venues").await;
        assert_eq!(status, StatusCode::OK);

        let areas = body["data"]["areas"].as_array().unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0]["state"], "CA");
        assert_eq!(areas[0]["venues"].as_array().unwrap().len(), 2);
        assert_eq!(areas[0]["venues"][0]["num_upcoming_shows"], 0);
        assert_eq!(areas[1]["city"], "New York");
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let (app, _pool) = setup().await;
        post_form(&app, "/venues/create", MUSICAL_HOP).await;
        post_form(&app, "/venues/create", PARK_SQUARE).await;

        let (_, body) = post_form(&app, "/venues/search", "search_term=Hop").await;
        assert_eq!(body["template"], templates::SEARCH_VENUES);
        assert_eq!(body["data"]["search_term"], "Hop");
        assert_eq!(body["data"]["results"]["count"], 1);
        assert_eq!(body["data"]["results"]["data"][0]["name"], "The Musical Hop");

        let (_, body) = post_form(&app, "/venues/search", "search_term=music").await;
        assert_eq!(body["data"]["results"]["count"], 2);
    }

    #[tokio::test]
    async fn detail_includes_genres_and_empty_schedule() {
        let (app, _pool) = setup().await;
        post_form(&app, "/venues/create", MUSICAL_HOP).await;

        let (status, body) = get(&app, "/venues/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"], templates::SHOW_VENUE);

        let data = &body["data"];
        assert_eq!(data["name"], "The Musical Hop");
        assert_eq!(data["address"], "1015 Folsom Street");
        assert_eq!(data["genres"], serde_json::json!(["Jazz", "Reggae"]));
        assert_eq!(data["seeking_talent"], false);
        assert_eq!(data["upcoming_shows_count"], 0);
        assert_eq!(data["past_shows_count"], 0);
    }

    #[tokio::test]
    async fn unknown_or_malformed_id_is_404() {
        let (app, _pool) = setup().await;

        let (status, body) = get(&app, "/venues/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["template"], templates::NOT_FOUND);

        let (status, _) = get(&app, "/venues/abc").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(&app, "/venues/42/edit").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_required_field_is_400() {
        let (app, pool) = setup().await;

        let (status, body) =
            post_form(&app, "/venues/create", "name=Nowhere&city=Oakland&state=CA").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["data"]["field"], "address");
        assert_eq!(VenueRepo::new(&pool).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn genres_are_shared_between_venues() {
        let (app, pool) = setup().await;
        post_form(&app, "/venues/create", MUSICAL_HOP).await;
        post_form(&app, "/venues/create", PARK_SQUARE).await;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM genres WHERE name = 'Jazz'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn edit_submission_redirects_without_saving() {
        let (app, _pool) = setup().await;
        post_form(&app, "/venues/create", MUSICAL_HOP).await;

        let (status, body) = get(&app, "/venues/1/edit").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template"], templates::EDIT_VENUE);

        let request = Request::builder()
            .method("POST")
            .uri("/venues/1/edit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(
                "name=Renamed&city=San+Francisco&state=CA&address=1015+Folsom+Street",
            ))
            .unwrap();
        let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/venues/1");

        let (_, body) = get(&app, "/venues/1").await;
        assert_eq!(body["data"]["name"], "The Musical Hop");
    }

    #[tokio::test]
    async fn delete_is_accepted_but_ignored() {
        let (app, pool) = setup().await;
        post_form(&app, "/venues/create", MUSICAL_HOP).await;

        let request = Request::builder()
            .method("DELETE")
            .uri("/venues/1")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(VenueRepo::new(&pool).count().await.unwrap(), 1);
    }
}
