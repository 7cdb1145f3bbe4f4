//! Show routes

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use tracing::{info, warn};

use crate::db::repos::{ShowListing, ShowRepo};
use crate::http::error::ApiError;
use crate::http::extractors::SubmittedForm;
use crate::http::server::AppState;
use crate::http::view::{self, templates, Flash, View};
use crate::models::ShowForm;

#[derive(Debug, Serialize)]
pub struct ShowIndex {
    pub shows: Vec<ShowListing>,
}

/// GET /shows
async fn list_shows(State(state): State<Arc<AppState>>) -> Result<View<ShowIndex>, ApiError> {
    let shows = ShowRepo::new(&state.pool).list().await?;
    Ok(View::new(templates::SHOWS, ShowIndex { shows }))
}

/// GET /shows/create
async fn create_show_form() -> View<()> {
    View::new(templates::NEW_SHOW, ())
}

/// POST /shows/create
///
/// Unknown venue or artist ids surface as an error flash, not a 4xx.
async fn create_show_submission(
    State(state): State<Arc<AppState>>,
    SubmittedForm(form): SubmittedForm<ShowForm>,
) -> View<()> {
    let flash = match ShowRepo::new(&state.pool).create(&form).await {
        Ok(id) => {
            info!(
                show_id = id,
                venue_id = form.venue_id,
                artist_id = form.artist_id,
                "show listed"
            );
            Flash::success("Show was successfully listed!")
        }
        Err(e) => {
            warn!(
                venue_id = form.venue_id,
                artist_id = form.artist_id,
                error = %e,
                "show creation failed"
            );
            Flash::error("An error occurred. Show could not be listed.")
        }
    };

    view::home().with_flash(flash)
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/shows", get(list_shows)).route(
        "/shows/create",
        get(create_show_form).post(create_show_submission),
    )
}
