//! Database connection pool management
//!
//! One pool per process, provisioned at startup from resolved
//! `DbSettings`. Construction is lazy: no credentials are checked and
//! no socket is opened here, so a malformed target shows up on the
//! first query rather than at provisioning time.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DbSettings;

/// Maximum physical connections held by the pool.
const MAX_CONNECTIONS: u32 = 10;

/// How long an acquire may block when the pool is exhausted.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(60);

/// Idle connections are recycled after this long.
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Build the process-wide connection pool.
pub fn create_pool(settings: &DbSettings) -> PgPool {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .connect_lazy_with(connect_options(settings))
}

fn connect_options(settings: &DbSettings) -> PgConnectOptions {
    match settings {
        DbSettings::Tcp {
            host,
            port,
            user,
            password,
            database,
        } => PgConnectOptions::new()
            .host(host)
            .port(*port)
            .username(user)
            .password(password)
            .database(database),
        DbSettings::UnixSocket {
            socket_dir,
            user,
            password,
            database,
        } => PgConnectOptions::new()
            .socket(socket_dir)
            .username(user)
            .password(password)
            .database(database),
    }
}
