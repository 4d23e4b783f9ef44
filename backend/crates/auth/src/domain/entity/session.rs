//! Session Entity
//!
//! Server-side state for one visitor. The record is what the session store
//! persists under the token digest.

use chrono::{DateTime, Duration, Utc};
use platform::crypto::random_token;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_id::UserId;

/// Keys this application keeps in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionData {
    /// Authenticated identity, absent for anonymous visitors
    pub user_id: Option<UserId>,
    /// One-shot notification, removed when read
    pub flash: Option<String>,
    /// Anti-forgery token embedded in every form
    pub csrf_token: String,
    /// Where to send the visitor after a successful login
    pub redirect_after_login: Option<String>,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            user_id: None,
            flash: None,
            csrf_token: random_token(),
            redirect_after_login: None,
        }
    }
}

/// Persisted session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub data: SessionData,
    /// Absolute expiry, fixed when the session starts
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// New anonymous session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: SessionData::default(),
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Whole seconds left, for the cookie's `Max-Age`
    pub fn remaining_secs(&self) -> u64 {
        (self.expires_at - Utc::now()).num_seconds().max(0) as u64
    }
}
