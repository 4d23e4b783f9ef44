//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::credentials::{self, SharedHasher};
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: Email,
    pub password: ClearTextPassword,
}

/// Sign up use case
pub struct SignUpUseCase<U> {
    users: Arc<U>,
    hasher: SharedHasher,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository + Sync,
{
    pub fn new(users: Arc<U>, hasher: SharedHasher) -> Self {
        Self { users, hasher }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<UserId> {
        // Cheap pre-check; the unique constraint still decides under a race.
        if self.users.exists_by_email(&input.email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let hashed_password = credentials::hash(&self.hasher, input.password).await?;

        let id = self
            .users
            .create(&NewUser {
                name: input.name.trim().to_string(),
                email: input.email,
                hashed_password,
            })
            .await?;

        tracing::info!(user_id = %id, "User signed up");

        Ok(id)
    }
}
