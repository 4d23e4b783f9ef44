//! Password work off the async executor
//!
//! Argon2 is deliberately slow; hashing and verification run on the blocking
//! pool so they never stall other requests.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};

use crate::error::AuthResult;

/// Shared hasher handle
pub type SharedHasher = Arc<dyn PasswordHasher>;

pub(crate) async fn hash(
    hasher: &SharedHasher,
    password: ClearTextPassword,
) -> AuthResult<HashedPassword> {
    let hasher = Arc::clone(hasher);
    let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;
    Ok(hashed)
}

pub(crate) async fn verify(
    hasher: &SharedHasher,
    password: ClearTextPassword,
    hashed: HashedPassword,
) -> AuthResult<bool> {
    let hasher = Arc::clone(hasher);
    let ok = tokio::task::spawn_blocking(move || hasher.verify(&password, &hashed)).await?;
    Ok(ok)
}
