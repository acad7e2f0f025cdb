//! parkscout-server: location API over PostGIS
//!
//! Exposes nearby-park, nearby-place, and notification queries plus a
//! free-spot update endpoint. The database does the heavy lifting
//! (distance, ordering, limits); each handler binds path parameters
//! into a single statement and serializes the rows.

pub mod config;
pub mod db;
pub mod http;
pub mod state;

pub use http::error::ApiError;
pub use http::server::{build_router, run_server, ServerConfig};
pub use state::AppState;
