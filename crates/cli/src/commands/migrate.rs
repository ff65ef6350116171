//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! helpdesk-cli migrate
//! helpdesk-cli migrate --database /srv/helpdesk/tickets.db
//! ```
//!
//! The server applies the same embedded migrations on startup, so this is
//! only needed to prepare a database ahead of time.

use std::path::Path;

use helpdesk_server::db::{self, RepositoryError};

/// Create the database file if needed and apply pending migrations.
///
/// # Errors
///
/// Returns `RepositoryError` if the file cannot be opened or a migration
/// fails.
pub async fn run(database: &Path) -> Result<(), RepositoryError> {
    tracing::info!(database = %database.display(), "Running ticket store migrations...");

    let pool = db::create_pool(database).await?;
    db::run_migrations(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations complete!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_creates_database_and_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.db");

        run(&path).await.unwrap();
        assert!(path.exists());

        run(&path).await.unwrap();
    }
}
