//! Email Value Object
//!
//! An email address in canonical form (trimmed, lower-cased). Shape checks are
//! done by the form validator before an `Email` is built; parsing here applies
//! the same rules so lookups never run against malformed input.

use derive_more::Display;
use kernel::validation::{EMAIL_RX, rules};
use serde::{Deserialize, Serialize};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub struct Email(String);

impl Email {
    /// Canonicalize and check the shape of a submitted address
    pub fn parse(raw: &str) -> Option<Self> {
        let email = raw.trim().to_lowercase();

        let ok = rules::not_blank(&email)
            && rules::max_chars(&email, EMAIL_MAX_LENGTH)
            && rules::matches(&email, &EMAIL_RX);

        ok.then_some(Self(email))
    }

    /// Create from database value (assumed already canonical)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::parse("alice@example.com").is_some());
        assert!(Email::parse("user.name+tag@example.co.jp").is_some());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::parse("").is_none());
        assert!(Email::parse("   ").is_none());
        assert!(Email::parse("userexample.com").is_none());
        assert!(Email::parse("user@").is_none());
        assert!(Email::parse("@example.com").is_none());
    }

    #[test]
    fn test_email_canonical_form() {
        let email = Email::parse("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
        assert_eq!(email.to_string(), "alice@example.com");
    }
}
