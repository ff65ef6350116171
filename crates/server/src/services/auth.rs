//! Admin authentication service.
//!
//! The admin panel has a single configured login. Submitted credentials are
//! compared by HMAC-SHA256 tag (keyed with the session secret) so the check
//! runs in constant time regardless of where the strings differ.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::config::AdminCredentials;
use crate::models::CurrentAdmin;

type HmacSha256 = Hmac<Sha256>;

/// Checks login attempts against the configured admin credentials.
pub struct AdminAuthService<'a> {
    credentials: &'a AdminCredentials,
    key: &'a SecretString,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(credentials: &'a AdminCredentials, key: &'a SecretString) -> Self {
        Self { credentials, key }
    }

    /// Verify a login attempt.
    ///
    /// Returns the session identity on success, `None` on any mismatch.
    #[must_use]
    pub fn login(&self, username: &str, password: &str) -> Option<CurrentAdmin> {
        // Both comparisons always run
        let username_ok = self.matches(username, &self.credentials.username);
        let password_ok = self.matches(password, self.credentials.password.expose_secret());

        (username_ok & password_ok).then(|| CurrentAdmin {
            username: self.credentials.username.clone(),
        })
    }

    fn matches(&self, submitted: &str, expected: &str) -> bool {
        let Some(expected_tag) = self.tag(expected) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(self.key.expose_secret().as_bytes()) else {
            return false;
        };
        mac.update(submitted.as_bytes());
        mac.verify_slice(&expected_tag).is_ok()
    }

    fn tag(&self, value: &str) -> Option<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(self.key.expose_secret().as_bytes()).ok()?;
        mac.update(value.as_bytes());
        Some(mac.finalize().into_bytes().to_vec())
    }
}
