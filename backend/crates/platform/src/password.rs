//! Password Hashing and Verification
//!
//! The rest of the workspace only sees the [`PasswordHasher`] seam: a one-way,
//! salted hash plus a comparison against a stored hash. [`Argon2Hasher`] is the
//! production implementation.
//!
//! ## Security Features
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of clear text on drop
//! - Unicode NFKC normalization before hashing
//! - Optional application-wide pepper

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`, and `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap submitted text. Policy (length etc.) is the form validator's job;
    /// here the input is only NFKC-normalized so equivalent spellings hash alike.
    pub fn new(raw: impl Into<String>) -> Self {
        let mut raw = raw.into();
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher seam
// ============================================================================

/// One-way, salted password hashing and comparison
pub trait PasswordHasher: Send + Sync + 'static {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError>;

    /// Constant-time comparison against a stored hash. Malformed hashes never verify.
    fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool;
}

/// Argon2id hasher
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    pepper: Option<Vec<u8>>,
}

impl Default for Argon2Hasher {
    /// OWASP recommended parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            params: Params::default(),
            pepper: None,
        }
    }
}

impl Argon2Hasher {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self {
            pepper,
            ..Self::default()
        }
    }

    /// Minimal cost parameters. Only for tests and local development.
    pub fn low_cost() -> Self {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap_or_default();
        Self {
            params,
            pepper: None,
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    fn peppered(&self, password: &ClearTextPassword) -> Vec<u8> {
        let mut bytes = password.as_bytes().to_vec();
        if let Some(pepper) = &self.pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let mut bytes = self.peppered(password);
        let salt = SaltString::generate(OsRng);

        let result = self
            .argon2()
            .hash_password(&bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        bytes.zeroize();
        result
    }

    fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return false;
        };

        let mut bytes = self.peppered(password);
        // Argon2 uses constant-time comparison internally
        let ok = self.argon2().verify_password(&bytes, &parsed).is_ok();
        bytes.zeroize();
        ok
    }
}

// ============================================================================
// Tests
// ============================================================================
