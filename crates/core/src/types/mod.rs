//! Core types for the helpdesk.
//!
//! This module provides type-safe wrappers for the ticket domain.

pub mod id;
pub mod ticket;

pub use id::*;
pub use ticket::{LOANER_TAG_PLACEHOLDER, NewTicket, Ticket, TicketField, TicketFieldError};
