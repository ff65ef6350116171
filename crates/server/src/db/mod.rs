//! Database operations for the ticket store.
//!
//! # Database: SQLite file (default `tickets.db`)
//!
//! ## Tables
//!
//! - `tickets` - Submitted repair requests (insert-only)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/`, embedded at compile
//! time and applied on every server start, so a missing database file or table
//! is created on first use. They can also be run explicitly:
//! ```bash
//! cargo run -p helpdesk-cli -- migrate
//! ```

pub mod tickets;

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use tickets::TicketRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Open the SQLite ticket store, creating the file if it does not exist.
///
/// The pool is kept small: the store only sees low-volume form traffic and
/// SQLite serializes writers anyway.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be opened.
pub async fn create_pool(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
}

/// Create the `tickets` table if it is missing.
///
/// # Errors
///
/// Returns `RepositoryError::Migration` if a migration fails to apply.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Open the store and make sure the schema exists.
///
/// # Errors
///
/// Returns `RepositoryError` if the file cannot be opened or migrated.
pub async fn init(path: &Path) -> Result<SqlitePool, RepositoryError> {
    let pool = create_pool(path).await?;
    run_migrations(&pool).await?;
    tracing::info!(path = %path.display(), "Ticket store ready");
    Ok(pool)
}
