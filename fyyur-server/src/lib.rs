//! fyyur-server: venue and artist booking directory over HTTP
//!
//! Venues and artists are listed through web forms; shows link one artist
//! to one venue at a start time. Pages are returned as view envelopes so
//! any renderer can sit in front of the server.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod seed;

pub use config::{load_dotenv, Settings};
pub use error::{ServerError, ServerResult};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use seed::{seed, SeedError, SeedReport};
