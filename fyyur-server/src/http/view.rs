//! View envelope handed to the presentation layer
//!
//! Handlers never render markup. They name a template and supply a
//! serializable context plus any flash messages; the envelope is emitted as
//! JSON so any renderer can sit in front of it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Template names
pub mod templates {
    pub const HOME: &str = "pages/home.html";
    pub const VENUES: &str = "pages/venues.html";
    pub const SEARCH_VENUES: &str = "pages/search_venues.html";
    pub const SHOW_VENUE: &str = "pages/show_venue.html";
    pub const ARTISTS: &str = "pages/artists.html";
    pub const SEARCH_ARTISTS: &str = "pages/search_artists.html";
    pub const SHOW_ARTIST: &str = "pages/show_artist.html";
    pub const SHOWS: &str = "pages/shows.html";
    pub const NEW_VENUE: &str = "forms/new_venue.html";
    pub const EDIT_VENUE: &str = "forms/edit_venue.html";
    pub const NEW_ARTIST: &str = "forms/new_artist.html";
    pub const EDIT_ARTIST: &str = "forms/edit_artist.html";
    pub const NEW_SHOW: &str = "forms/new_show.html";
    pub const BAD_REQUEST: &str = "errors/400.html";
    pub const NOT_FOUND: &str = "errors/404.html";
    pub const SERVER_ERROR: &str = "errors/500.html";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

/// One-shot user notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Template selection plus render context
#[derive(Debug, Serialize)]
pub struct View<T> {
    pub template: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<Flash>,
    pub data: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> View<T> {
    pub fn new(template: &'static str, data: T) -> Self {
        Self {
            template,
            flashes: Vec::new(),
            data,
            status: StatusCode::OK,
        }
    }

    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flashes.push(flash);
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

/// Home page, the landing spot after every creation form.
pub fn home() -> View<()> {
    View::new(templates::HOME, ())
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
