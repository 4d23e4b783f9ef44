//! Session Token Value Object
//!
//! The opaque value carried in the session cookie. Stores never keep the token
//! itself, only its SHA-256 digest, so a leaked session table cannot be replayed
//! as cookies.

use std::fmt;

use platform::crypto::{random_token, sha256};

/// Base64 (URL-safe, unpadded) length of a 32-byte token
const TOKEN_LEN: usize = 43;

#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Fresh random token
    pub fn generate() -> Self {
        Self(random_token())
    }

    /// Accept a cookie value only if it has the shape of a token we issued
    pub fn from_cookie(value: &str) -> Option<Self> {
        let well_formed = value.len() == TOKEN_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        well_formed.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key
    pub fn digest(&self) -> [u8; 32] {
        sha256(self.0.as_bytes())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // first characters are enough to correlate log lines
        write!(f, "SessionToken({}…)", &self.0[..self.0.len().min(6)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_parse_back() {
        let token = SessionToken::generate();
        assert_eq!(SessionToken::from_cookie(token.as_str()), Some(token));
    }

    #[test]
    fn test_rejects_foreign_cookie_values() {
        assert!(SessionToken::from_cookie("").is_none());
        assert!(SessionToken::from_cookie("short").is_none());
        assert!(SessionToken::from_cookie(&"a".repeat(42)).is_none());
        assert!(SessionToken::from_cookie(&format!("{}=", "a".repeat(42))).is_none());
    }

    #[test]
    fn test_digest_differs_per_token() {
        let a = SessionToken::generate();
        let b = SessionToken::generate();
        assert_ne!(a.digest(), b.digest());
        assert_eq!(a.digest(), a.clone().digest());
    }

    #[test]
    fn test_debug_does_not_print_whole_token() {
        let token = SessionToken::generate();
        let debug = format!("{token:?}");
        assert!(!debug.contains(token.as_str()));
    }
}
