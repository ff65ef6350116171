//! Helpdesk Core - Shared types library.
//!
//! This crate provides the domain types used across the helpdesk components:
//! - `server` - Intake form, confirmation view and admin panel
//! - `cli` - Command-line tools for database setup and exports
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe ticket IDs and the ticket record types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
