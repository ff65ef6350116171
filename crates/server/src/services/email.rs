//! Email service for forwarding new tickets to the ticketing inbox.
//!
//! Uses SMTP via lettre (STARTTLS + credentials) with an Askama plain text
//! template. Delivery is best-effort: see [`notify_best_effort`].

use askama::Template;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use helpdesk_core::Ticket;

use crate::config::EmailConfig;

/// Plain text template for the new ticket email.
#[derive(Template)]
#[template(path = "email/new_ticket.txt")]
struct NewTicketEmailText<'a> {
    ticket: &'a Ticket,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Something that can tell the helpdesk about a new ticket.
#[async_trait]
pub trait TicketNotifier: Send + Sync {
    /// Deliver a notification for a freshly stored ticket.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the message cannot be built or delivered.
    async fn notify(&self, ticket: &Ticket) -> Result<(), EmailError>;
}

/// Subject line and plain text body for a ticket notification.
///
/// # Errors
///
/// Returns `EmailError::Template` if the body template fails to render.
pub fn compose(ticket: &Ticket) -> Result<(String, String), EmailError> {
    let subject = format!("New Device Repair Request: {}", ticket.asset_tag);
    let body = NewTicketEmailText { ticket }.render()?;
    Ok((subject, body))
}

/// Send a ticket notification, logging and swallowing any failure.
///
/// Ticket creation never fails because of email; delivery is attempted once.
pub async fn notify_best_effort(notifier: &dyn TicketNotifier, ticket: &Ticket) {
    match notifier.notify(ticket).await {
        Ok(()) => {
            tracing::info!(ticket_id = %ticket.id, "Ticket email sent");
        }
        Err(e) => {
            tracing::error!(ticket_id = %ticket.id, error = %e, "Error sending ticket email");
        }
    }
}

/// SMTP-backed notifier that mails every ticket to one fixed inbox.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    inbox: Mailbox,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// No connection is opened here; the transport connects on first send.
    ///
    /// # Errors
    ///
    /// Returns error if the sender or inbox address is invalid or the TLS
    /// parameters for the SMTP host cannot be built.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from: parse_mailbox(&config.from_address)?,
            inbox: parse_mailbox(&config.ticket_inbox)?,
        })
    }
}

#[async_trait]
impl TicketNotifier for EmailService {
    async fn notify(&self, ticket: &Ticket) -> Result<(), EmailError> {
        let (subject, body) = compose(ticket)?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(self.inbox.clone())
            .subject(&subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.mailer.send(email).await?;

        tracing::info!(to = %self.inbox, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address
        .parse()
        .map_err(|_| EmailError::InvalidAddress(address.to_string()))
}
