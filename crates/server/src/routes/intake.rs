//! Ticket intake route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use helpdesk_core::NewTicket;

use crate::db::TicketRepository;
use crate::error::AppError;
use crate::filters;
use crate::services::notify_best_effort;
use crate::state::AppState;

/// Intake form data.
///
/// Fields default to empty so a missing field is reported the same way as a
/// blank one.
#[derive(Debug, Default, Deserialize)]
pub struct IntakeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub asset_tag: String,
    #[serde(default)]
    pub loaner_tag: Option<String>,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub problem: String,
}

impl IntakeForm {
    /// Validate and normalize the submission.
    fn into_new_ticket(self) -> Result<NewTicket, AppError> {
        Ok(NewTicket::new(
            &self.name,
            &self.email,
            &self.asset_tag,
            self.loaner_tag.as_deref(),
            &self.building,
            &self.problem,
        )?)
    }
}

/// Intake page template.
#[derive(Template, WebTemplate)]
#[template(path = "intake/form.html")]
pub struct IntakeFormTemplate;

/// Display the intake form.
#[instrument]
pub async fn form_page() -> impl IntoResponse {
    IntakeFormTemplate
}

/// Handle an intake form submission.
///
/// The ticket is stored first; the email notification is attempted once
/// afterwards and its outcome never changes the response.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<IntakeForm>,
) -> Result<Redirect, AppError> {
    let new_ticket = form.into_new_ticket()?;

    let id = TicketRepository::new(state.pool())
        .create(&new_ticket)
        .await?;
    tracing::info!(ticket_id = %id, asset_tag = %new_ticket.asset_tag(), "Ticket created");

    let ticket = new_ticket.into_ticket(id);
    notify_best_effort(state.notifier(), &ticket).await;

    Ok(Redirect::to(&format!("/ticket/{id}")))
}
