//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Admin credential check
//! - `email` - Ticket notification via SMTP
//! - `export` - CSV serialization of tickets

pub mod auth;
pub mod email;
pub mod export;

pub use auth::AdminAuthService;
pub use email::{EmailError, EmailService, TicketNotifier, notify_best_effort};
pub use export::{EXPORT_FILENAME, tickets_to_csv};
