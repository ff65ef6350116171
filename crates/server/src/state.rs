//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ServerConfig;
use crate::services::{EmailError, EmailService, TicketNotifier};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration, the ticket store and the notifier.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
    notifier: Arc<dyn TicketNotifier>,
}

impl AppState {
    /// Create application state that mails tickets over SMTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the email configuration is invalid.
    pub fn new(config: ServerConfig, pool: SqlitePool) -> Result<Self, EmailError> {
        let notifier = Arc::new(EmailService::new(&config.email)?);
        Ok(Self::with_notifier(config, pool, notifier))
    }

    /// Create application state with a custom notifier.
    #[must_use]
    pub fn with_notifier(
        config: ServerConfig,
        pool: SqlitePool,
        notifier: Arc<dyn TicketNotifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                notifier,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the ticket store connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the ticket notifier.
    #[must_use]
    pub fn notifier(&self) -> &dyn TicketNotifier {
        self.inner.notifier.as_ref()
    }
}
