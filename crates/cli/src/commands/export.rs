//! CSV export command.
//!
//! # Usage
//!
//! ```bash
//! helpdesk-cli export > tickets.csv
//! helpdesk-cli export --output tickets.csv
//! ```
//!
//! Produces the same file as the admin panel's download.

use std::io::Write;
use std::path::Path;

use helpdesk_server::db::{self, RepositoryError, TicketRepository};
use helpdesk_server::services::tickets_to_csv;
use thiserror::Error;

/// Errors from the export command.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Write every ticket as CSV, newest first, to `output` or stdout.
///
/// # Errors
///
/// Returns `ExportError` if the store cannot be read or the output cannot be
/// written.
pub async fn run(database: &Path, output: Option<&Path>) -> Result<(), ExportError> {
    let pool = db::init(database).await?;
    let tickets = TicketRepository::new(&pool).list_all().await?;
    pool.close().await;

    let csv = tickets_to_csv(&tickets);

    match output {
        Some(path) => {
            std::fs::write(path, &csv)?;
            tracing::info!(rows = tickets.len(), output = %path.display(), "Export complete");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(csv.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use helpdesk_core::NewTicket;

    #[tokio::test]
    async fn test_export_writes_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let database = dir.path().join("tickets.db");
        let output = dir.path().join("out.csv");

        let pool = db::init(&database).await.unwrap();
        let repo = TicketRepository::new(&pool);
        for asset_tag in ["LAP-1", "LAP-2"] {
            let ticket =
                NewTicket::new("A. Lee", "a@x.com", asset_tag, None, "Hall 3", "Broken").unwrap();
            repo.create(&ticket).await.unwrap();
        }
        pool.close().await;

        run(&database, Some(&output)).await.unwrap();

        let csv = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "ID,Name,Email,Asset Tag,Loaner Tag,Building,Problem");
        assert_eq!(lines[1], "2,A. Lee,a@x.com,LAP-2,,Hall 3,Broken");
        assert_eq!(lines[2], "1,A. Lee,a@x.com,LAP-1,,Hall 3,Broken");
    }
}
