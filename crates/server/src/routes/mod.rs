//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Intake form
//! POST /                  - Submit a ticket (303 to /ticket/{id})
//! GET  /ticket/{id}       - Confirmation page
//!
//! # Auth
//! GET  /admin/login       - Login page
//! POST /admin/login       - Login action
//! GET  /admin/logout      - Logout action
//!
//! # Admin (requires auth)
//! GET  /admin             - Ticket dashboard
//! GET  /admin/export      - CSV download of every ticket
//! ```

pub mod auth;
pub mod dashboard;
pub mod intake;
pub mod tickets;

use axum::{Router, middleware::from_fn, routing::get};

use crate::middleware::require_admin;
use crate::state::AppState;

/// Create the public intake routes router.
pub fn intake_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(intake::form_page).post(intake::submit))
        .route("/ticket/{id}", get(tickets::show))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(auth::login_page).post(auth::login))
        .route("/admin/logout", get(auth::logout))
}

/// Create the admin routes router.
///
/// Every route here sits behind [`require_admin`].
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard::index))
        .route("/admin/export", get(dashboard::export))
        .route_layer(from_fn(require_admin))
}

/// Build the complete application router (without state).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(intake_routes())
        .merge(auth_routes())
        .merge(admin_routes())
}
