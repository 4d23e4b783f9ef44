//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use platform::password::HashedPassword;

use crate::domain::entity::{
    session::SessionRecord,
    user::{NewUser, User},
};
use crate::domain::value_object::{email::Email, session_token::SessionToken, user_id::UserId};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user. Fails with `DuplicateEmail` if the email is taken.
    async fn create(&self, user: &NewUser) -> AuthResult<UserId>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find user by canonical email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if a user with this ID still exists
    async fn exists(&self, id: UserId) -> AuthResult<bool>;

    /// Check if email is taken
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Replace the stored password hash
    async fn update_password_hash(&self, id: UserId, hash: &HashedPassword) -> AuthResult<()>;
}

/// Session store trait
///
/// Records are keyed by the token digest. Expired records are never returned.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Find a live session
    async fn find(&self, token: &SessionToken) -> AuthResult<Option<SessionRecord>>;

    /// Persist a session that has not been stored before
    async fn insert(&self, token: &SessionToken, record: &SessionRecord) -> AuthResult<()>;

    /// Overwrite an existing session. Returns `false` (and stores nothing) when
    /// the token no longer exists, e.g. because it was renewed meanwhile.
    async fn update(&self, token: &SessionToken, record: &SessionRecord) -> AuthResult<bool>;

    /// Atomically move `record` from `old` to `new`. Returns `false` when `old`
    /// is already gone; at most one caller can win for a given `old`.
    async fn rotate(
        &self,
        old: &SessionToken,
        new: &SessionToken,
        record: &SessionRecord,
    ) -> AuthResult<bool>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
