//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - Pool is opened at process start and injected through `AppState`
//! - Cross-entity reads are explicit JOINs - no lazy loading, no N+1
//! - Every write is one transaction; an uncommitted transaction rolls back on drop

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, memory_pool};
pub use repos::*;
