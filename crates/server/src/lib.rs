//! Helpdesk intake server library.
//!
//! Serves the public device-repair intake form, the ticket confirmation page
//! and a small password-protected admin panel with CSV export. Tickets live
//! in a local SQLite file; every new ticket is also mailed to the helpdesk
//! inbox on a best-effort basis.
//!
//! The router is built here rather than in `main` so the integration tests
//! can serve exactly what production serves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use middleware::{
    SessionLayerError, create_session_layer, request_id_middleware, security_headers_middleware,
};
use state::AppState;

/// Directory holding the stylesheet served under `/static`.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the full application router.
///
/// # Errors
///
/// Returns `SessionLayerError` if the session secret cannot be used as a
/// cookie signing key.
pub fn build_router(state: AppState) -> Result<Router, SessionLayerError> {
    let session_layer = create_session_layer(state.config())?;

    Ok(Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the ticket store cannot be queried.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, header};
    use helpdesk_core::Ticket;
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{AdminCredentials, EmailConfig, ServerConfig};
    use crate::services::{EmailError, TicketNotifier};

    struct NoopNotifier;

    #[async_trait]
    impl TicketNotifier for NoopNotifier {
        async fn notify(&self, _ticket: &Ticket) -> Result<(), EmailError> {
            Ok(())
        }
    }

    fn config(dir: &tempfile::TempDir) -> ServerConfig {
        ServerConfig {
            database_path: dir.path().join("tickets.db"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            base_url: "http://localhost:5050".to_string(),
            session_secret: SecretString::from("q7Lm2Xv9Rt4Bn8Kp1Zw6Hy3Dj5Fs0GcA".repeat(2)),
            admin: AdminCredentials {
                username: "helpdesk".to_string(),
                password: SecretString::from("Tr0ub4dor&3"),
            },
            email: EmailConfig {
                smtp_host: "127.0.0.1".to_string(),
                smtp_port: 1,
                smtp_username: "tickets@example.com".to_string(),
                smtp_password: SecretString::from("pass"),
                from_address: "tickets@example.com".to_string(),
                ticket_inbox: "kace@example.com".to_string(),
            },
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    async fn app(dir: &tempfile::TempDir) -> Router {
        let config = config(dir);
        let pool = db::init(&config.database_path).await.unwrap();
        let state = AppState::with_notifier(config, pool, Arc::new(NoopNotifier));
        build_router(state).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir).await;

        let response = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_requires_login() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir).await;

        for uri in ["/admin", "/admin/export"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[header::LOCATION], "/admin/login");
        }
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ticket_ids_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir).await;

        for uri in ["/ticket/999", "/ticket/abc", "/ticket/-1"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_submission_redirects_to_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir).await;

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "name=A.+Lee&email=a%40x.com&asset_tag=LAP-42&loaner_tag=&building=Hall+3&problem=Dead",
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/ticket/1");

        let response = app.oneshot(get("/ticket/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("LAP-42"));
        assert!(html.contains("None"));
    }

    #[tokio::test]
    async fn test_responses_carry_security_and_request_id_headers() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir).await;

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert!(response.headers().contains_key("x-request-id"));
    }
}
