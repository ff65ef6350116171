//! Ticket confirmation page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use helpdesk_core::{Ticket, TicketId};

use crate::db::TicketRepository;
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "tickets/show.html")]
pub struct TicketShowTemplate {
    pub ticket: Ticket,
}

/// Display a stored ticket.
///
/// An ID that is not an integer is treated like an unknown ID.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let not_found = || AppError::NotFound(format!("ticket {id}"));

    let ticket_id: TicketId = id.parse().map_err(|_| not_found())?;
    let ticket = TicketRepository::new(state.pool())
        .get(ticket_id)
        .await?
        .ok_or_else(not_found)?;

    Ok(TicketShowTemplate { ticket })
}
