//! Ticket repository for database operations.
//!
//! Tickets are insert-only: there is no update or delete.

use sqlx::SqlitePool;

use helpdesk_core::{NewTicket, Ticket, TicketId};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for ticket queries.
#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: i64,
    name: String,
    email: String,
    asset_tag: String,
    loaner_tag: Option<String>,
    building: String,
    problem: String,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Self {
            id: TicketId::new(row.id),
            name: row.name,
            email: row.email,
            asset_tag: row.asset_tag,
            loaner_tag: row.loaner_tag,
            building: row.building,
            problem: row.problem,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for ticket database operations.
pub struct TicketRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TicketRepository<'a> {
    /// Create a new ticket repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a ticket and return its store-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, ticket: &NewTicket) -> Result<TicketId, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO tickets (name, email, asset_tag, loaner_tag, building, problem)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(ticket.name())
        .bind(ticket.email())
        .bind(ticket.asset_tag())
        .bind(ticket.loaner_tag())
        .bind(ticket.building())
        .bind(ticket.problem())
        .execute(self.pool)
        .await?;

        Ok(TicketId::new(result.last_insert_rowid()))
    }

    /// Get a ticket by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: TicketId) -> Result<Option<Ticket>, RepositoryError> {
        let row = sqlx::query_as::<_, TicketRow>(
            r"
            SELECT id, name, email, asset_tag, loaner_tag, building, problem
            FROM tickets
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List all tickets, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Ticket>, RepositoryError> {
        let rows = sqlx::query_as::<_, TicketRow>(
            r"
            SELECT id, name, email, asset_tag, loaner_tag, building, problem
            FROM tickets
            ORDER BY id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count stored tickets.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
