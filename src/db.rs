//! Database connection helpers.
//!
//! Wraps the Diesel r2d2 pool used for the SQLite database and applies the
//! embedded schema migrations.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{error, info};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

#[derive(Debug)]
/// Pragmas applied each time a connection is acquired from the pool.
pub struct ConnectionOptions {
    pub enable_wal: bool,
    pub enable_foreign_keys: bool,
    /// Timeout to wait for a locked database.
    pub busy_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            enable_wal: true,
            enable_foreign_keys: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ConnectionOptions {
    fn pragmas(&self) -> String {
        let mut pragmas = String::new();
        if self.enable_wal {
            pragmas.push_str("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        if self.enable_foreign_keys {
            pragmas.push_str("PRAGMA foreign_keys = ON;");
        }
        if let Some(timeout) = self.busy_timeout {
            pragmas.push_str(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()));
        }
        pragmas
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let pragmas = self.pragmas();
        if pragmas.is_empty() {
            return Ok(());
        }
        conn.batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a Diesel connection pool for the given database URL.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions::default()))
        .build(manager)
}

/// Retrieve a connection from the pool.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().inspect_err(|e| error!("Failed to get connection from pool: {e}"))
}

/// Applies every migration not yet recorded in the database.
pub fn run_migrations(pool: &DbPool) -> Result<usize, String> {
    let mut conn = get_connection(pool).map_err(|e| e.to_string())?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| format!("Failed to run migrations: {e}"))?;
    if !applied.is_empty() {
        info!("Applied {} database migration(s)", applied.len());
    }
    Ok(applied.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pragmas_follow_options() {
        let options = ConnectionOptions {
            enable_wal: false,
            enable_foreign_keys: true,
            busy_timeout: Some(Duration::from_millis(250)),
        };
        assert_eq!(
            options.pragmas(),
            "PRAGMA foreign_keys = ON;PRAGMA busy_timeout = 250;"
        );
    }
}
