//! Session-related types for admin authentication.
//!
//! The presence of a [`CurrentAdmin`] under [`keys::CURRENT_ADMIN`] is the
//! authenticated state; its absence is anonymous.

use serde::{Deserialize, Serialize};

/// Session-stored admin identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Username the admin logged in with.
    pub username: String,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
