//! Admin authentication guard and session helpers.
//!
//! The guard is applied as a route layer to the whole admin group, so every
//! admin handler runs only for an authenticated session.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Where anonymous visitors are sent.
pub const LOGIN_PATH: &str = "/admin/login";

/// Middleware that requires an authenticated admin session.
///
/// Anonymous requests are redirected to the login page without running the
/// handler. Authenticated requests get the [`CurrentAdmin`] inserted into the
/// request extensions.
///
/// # Example
///
/// ```rust,ignore
/// Router::new()
///     .route("/admin", get(dashboard::index))
///     .route_layer(axum::middleware::from_fn(require_admin))
/// ```
pub async fn require_admin(session: Session, mut request: Request, next: Next) -> Response {
    let Some(admin) = current_admin(&session).await else {
        tracing::debug!(path = %request.uri().path(), "Anonymous admin request, redirecting to login");
        return Redirect::to(LOGIN_PATH).into_response();
    };

    request.extensions_mut().insert(admin);
    next.run(request).await
}

/// Get the logged-in admin, if any.
pub async fn current_admin(session: &Session) -> Option<CurrentAdmin> {
    session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
}

/// Mark the session as authenticated.
///
/// The session ID is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Return the session to the anonymous state (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
