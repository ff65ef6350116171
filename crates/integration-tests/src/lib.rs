//! Integration test harness for the helpdesk server.
//!
//! Each [`TestContext`] runs the real router on an ephemeral localhost port
//! against a fresh SQLite file in a temporary directory, so tests are
//! independent and need no external services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p helpdesk-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, redirect};
use secrecy::SecretString;

use helpdesk_core::Ticket;
use helpdesk_server::config::{AdminCredentials, EmailConfig, ServerConfig};
use helpdesk_server::services::{EmailError, TicketNotifier};
use helpdesk_server::state::AppState;
use helpdesk_server::db::TicketRepository;
use helpdesk_server::{build_router, db};
use sqlx::SqlitePool;

pub const ADMIN_USERNAME: &str = "helpdesk";
pub const ADMIN_PASSWORD: &str = "Tr0ub4dor&3";

/// Notifier that remembers every ticket it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Ticket>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Ticket> {
        self.sent.lock().expect("notifier lock").clone()
    }
}

#[async_trait]
impl TicketNotifier for RecordingNotifier {
    async fn notify(&self, ticket: &Ticket) -> Result<(), EmailError> {
        self.sent.lock().expect("notifier lock").push(ticket.clone());
        Ok(())
    }
}

/// Notifier whose every delivery fails.
pub struct FailingNotifier;

#[async_trait]
impl TicketNotifier for FailingNotifier {
    async fn notify(&self, _ticket: &Ticket) -> Result<(), EmailError> {
        Err(EmailError::InvalidAddress("unreachable@invalid".to_string()))
    }
}

/// How the server under test delivers ticket emails.
pub enum Mailer {
    Recording(Arc<RecordingNotifier>),
    Failing,
    /// Real SMTP service pointed at a closed local port.
    UnreachableSmtp,
}

/// A running server plus an HTTP client with its own cookie jar.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: SqlitePool,
    _dir: tempfile::TempDir,
}

impl TestContext {
    /// Start a server that records notifications instead of sending them.
    pub async fn new() -> (Self, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = Self::with_mailer(Mailer::Recording(Arc::clone(&notifier))).await;
        (ctx, notifier)
    }

    /// Start a server with the given mail delivery behaviour.
    pub async fn with_mailer(mailer: Mailer) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = test_config(&dir);
        let pool = db::init(&config.database_path).await.expect("ticket store");

        let state = match mailer {
            Mailer::Recording(notifier) => AppState::with_notifier(config, pool.clone(), notifier),
            Mailer::Failing => {
                AppState::with_notifier(config, pool.clone(), Arc::new(FailingNotifier))
            }
            Mailer::UnreachableSmtp => AppState::new(config, pool.clone()).expect("email config"),
        };
        let app = build_router(state).expect("router");

        let listener = tokio::net::TcpListener::bind(SocketAddr::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            0,
        ))
        .await
        .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server");
        });

        Self {
            client: new_client(),
            base_url: format!("http://{addr}"),
            pool,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Submit the intake form with the given fields.
    pub async fn submit(&self, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url("/"))
            .form(fields)
            .send()
            .await
            .expect("submit")
    }

    /// Log in with the given credentials.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/admin/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("login")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.expect("get")
    }

    pub async fn ticket_count(&self) -> i64 {
        TicketRepository::new(&self.pool)
            .count()
            .await
            .expect("count")
    }
}

/// A complete, valid submission.
#[must_use]
pub fn valid_ticket() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "A. Lee"),
        ("email", "a@x.com"),
        ("asset_tag", "LAP-42"),
        ("loaner_tag", ""),
        ("building", "Hall 3"),
        ("problem", "Won't power on"),
    ]
}

/// `Location` header of a redirect response.
#[must_use]
pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_string()
}

/// Client that keeps cookies and never follows redirects.
fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

fn test_config(dir: &tempfile::TempDir) -> ServerConfig {
    ServerConfig {
        database_path: dir.path().join("tickets.db"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost".to_string(),
        session_secret: SecretString::from("q7Lm2Xv9Rt4Bn8Kp1Zw6Hy3Dj5Fs0GcA".repeat(2)),
        admin: AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password: SecretString::from(ADMIN_PASSWORD),
        },
        email: EmailConfig {
            smtp_host: "localhost".to_string(),
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
