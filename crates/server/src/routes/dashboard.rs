//! Admin dashboard and CSV export.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use helpdesk_core::Ticket;

use crate::db::TicketRepository;
use crate::error::AppError;
use crate::filters;
use crate::models::CurrentAdmin;
use crate::services::{EXPORT_FILENAME, tickets_to_csv};
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin: CurrentAdmin,
    pub count: i64,
    pub tickets: Vec<Ticket>,
}

/// List every ticket, newest first.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<impl IntoResponse, AppError> {
    let repo = TicketRepository::new(state.pool());
    let tickets = repo.list_all().await?;
    let count = repo.count().await?;

    Ok(DashboardTemplate {
        admin,
        count,
        tickets,
    })
}

/// Download every ticket as `tickets.csv`, newest first.
#[instrument(skip_all)]
pub async fn export(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<Response, AppError> {
    let tickets = TicketRepository::new(state.pool()).list_all().await?;
    tracing::info!(admin = %admin.username, rows = tickets.len(), "Exporting tickets");

    let csv = tickets_to_csv(&tickets);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
