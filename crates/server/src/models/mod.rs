//! Domain models for the server.
//!
//! Ticket types live in `helpdesk-core`; this module only holds what the web
//! layer keeps in the session.

pub mod session;

pub use session::{CurrentAdmin, keys as session_keys};
