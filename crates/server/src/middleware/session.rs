//! Session middleware configuration.
//!
//! Sessions live in memory only and are keyed by a signed cookie; restarting
//! the server logs every admin out.

use thiserror::Error;
use tower_sessions::cookie::{Key, SameSite, time::Duration};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::ServerConfig;
use secrecy::ExposeSecret;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "helpdesk_session";

/// Session expiry time in seconds (8 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 8 * 60 * 60;

/// Errors building the session layer.
#[derive(Debug, Error)]
pub enum SessionLayerError {
    /// The signing secret cannot be used as a cookie key.
    #[error("invalid session signing key: {0}")]
    InvalidKey(String),
}

/// Create the session layer with an in-memory store and signed cookies.
///
/// # Errors
///
/// Returns `SessionLayerError::InvalidKey` if the session secret is shorter
/// than 64 bytes.
pub fn create_session_layer(
    config: &ServerConfig,
) -> Result<SessionManagerLayer<MemoryStore, SignedCookie>, SessionLayerError> {
    let key = Key::try_from(config.session_secret.expose_secret().as_bytes())
        .map_err(|e| SessionLayerError::InvalidKey(e.to_string()))?;

    Ok(SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
