//! Home page and fallback

use std::sync::Arc;

use axum::{http::Uri, routing::get, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::http::view::{self, View};

/// GET /
async fn index() -> View<()> {
    view::home()
}

/// Any unmatched route.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: "page",
        id: uri.path().to_owned(),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}
