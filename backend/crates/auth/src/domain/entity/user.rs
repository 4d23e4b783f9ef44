//! User Entity

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_id::UserId};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Unique, canonical email (login identifier)
    pub email: Email,
    pub hashed_password: HashedPassword,
    pub created_at: DateTime<Utc>,
}

/// A user about to be inserted; the store assigns `id` and `created_at`
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub hashed_password: HashedPassword,
}
