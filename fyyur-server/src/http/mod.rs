//! HTTP layer
//!
//! Axum server with:
//! - Form submissions decoded into validated models
//! - View envelopes (template + flashes + context) as responses
//! - Error templates for 400/404/500
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod view;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig};
pub use view::{Flash, FlashLevel, View};
