// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create the application connection pool from configuration
///
/// The parent directory of the database file is created if missing.
pub fn create_connection_pool(config: &AppConfig) -> AppResult<ConnectionPool> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    create_connection_pool_at(
        &config.database_path,
        config.pool_max_size,
        config.busy_timeout_ms,
    )
}

/// Create a connection pool for a specific database file
///
/// Pool configuration:
/// - SQLite in WAL mode so catalog reads do not block a refresh
/// - Foreign keys enabled
/// - Busy timeout set to avoid immediate errors under concurrent writers
pub fn create_connection_pool_at(
    db_path: &Path,
    max_size: u32,
    busy_timeout_ms: u64,
) -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(move |conn| {
        conn.execute_batch(&format!(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = {};",
            busy_timeout_ms
        ))?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

    log::debug!(
        "Opened SQLite pool at {} (max {} connections)",
        db_path.display(),
        max_size
    );

    Ok(pool)
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_connection_pool_creation() {
        let dir = TempDir::new().unwrap();
        let pool = create_connection_pool_at(&dir.path().join("test.db"), 2, 1000).unwrap();
        let conn = get_connection(&pool).unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);

        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_pool_from_config_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let db_path: PathBuf = dir.path().join("nested").join("radiokeep.db");
        let config = AppConfig::from_lookup(|key| {
            (key == crate::config::ENV_DB_PATH).then(|| db_path.to_string_lossy().into_owned())
        })
        .unwrap();

        let pool = create_connection_pool(&config).unwrap();
        let conn = get_connection(&pool).unwrap();
        let result: i32 = conn.query_row("SELECT 1 + 1", [], |row| row.get(0)).unwrap();

        assert_eq!(result, 2);
        assert!(db_path.parent().unwrap().is_dir());
    }
}
