//! Admin login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::middleware::{LOGIN_PATH, clear_current_admin, current_admin, set_current_admin};
use crate::services::AdminAuthService;
use crate::state::AppState;

/// Shown for any failed login; never says which field was wrong.
const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Display the login page, or go straight to the dashboard when already
/// logged in.
#[instrument(skip(session))]
pub async fn login_page(session: Session) -> Response {
    if current_admin(&session).await.is_some() {
        return Redirect::to("/admin").into_response();
    }
    LoginTemplate { error: None }.into_response()
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let config = state.config();
    let auth = AdminAuthService::new(&config.admin, &config.session_secret);

    let Some(admin) = auth.login(&form.username, &form.password) else {
        tracing::warn!(username = %form.username, "Admin login failed");
        return LoginTemplate {
            error: Some(INVALID_CREDENTIALS.to_string()),
        }
        .into_response();
    };

    if let Err(e) = set_current_admin(&session, &admin).await {
        tracing::error!("Failed to set session: {e}");
        return LoginTemplate {
            error: Some("Could not start a session, please try again.".to_string()),
        }
        .into_response();
    }

    tracing::info!("Admin logged in");
    Redirect::to("/admin").into_response()
}

/// Log out and return to the login page.
///
/// Works the same whether or not the session was authenticated.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    Redirect::to(LOGIN_PATH)
}
