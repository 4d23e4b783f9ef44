//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Re-export cookie types from platform
pub use platform::cookie::{CookieConfig, SameSite};

/// Landing page after login when no target was remembered
pub const DEFAULT_LOGIN_REDIRECT: &str = "/snippet/create";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie attributes (name, Secure, SameSite, ...)
    pub cookie: CookieConfig,
    /// Absolute session lifetime (12 hours)
    pub session_lifetime: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie: CookieConfig {
                name: "session".to_string(),
                secure: true,
                http_only: true,
                same_site: SameSite::Lax,
                path: "/".to_string(),
                max_age_secs: None,
            },
            session_lifetime: Duration::from_secs(12 * 3600),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        let mut config = Self::default();
        config.cookie.secure = false;
        config
    }

    /// Session lifetime as a chrono duration, for record expiry arithmetic
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_lifetime).unwrap_or(chrono::Duration::hours(12))
    }
}
