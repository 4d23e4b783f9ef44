//! Sign In Use Case
//!
//! Verifies credentials, then moves the visitor's session to the authenticated
//! state under a new token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::DEFAULT_LOGIN_REDIRECT;
use crate::application::credentials::{self, SharedHasher};
use crate::application::session::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Sign in use case
pub struct SignInUseCase<U, S> {
    users: Arc<U>,
    sessions: Arc<S>,
    hasher: SharedHasher,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository + Sync,
    S: SessionRepository + Sync,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>, hasher: SharedHasher) -> Self {
        Self {
            users,
            sessions,
            hasher,
        }
    }

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password are the same `InvalidCredentials`, and
    /// both cost one Argon2 run, so neither the response nor its timing tells
    /// which accounts exist.
    pub async fn authenticate(
        &self,
        email: &str,
        password: ClearTextPassword,
    ) -> AuthResult<UserId> {
        let user = match Email::parse(email) {
            Some(email) => self.users.find_by_email(&email).await?,
            None => None,
        };

        let Some(user) = user else {
            credentials::hash(&self.hasher, password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !credentials::verify(&self.hasher, password, user.hashed_password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.id)
    }

    /// Record the identity in the session and return where to go next
    pub async fn establish(&self, session: &Session, user_id: UserId) -> AuthResult<String> {
        session.renew_token(self.sessions.as_ref()).await?;
        session.set_user_id(user_id);

        tracing::info!(user_id = %user_id, "User signed in");

        Ok(session
            .pop_redirect_after_login()
            .unwrap_or_else(|| DEFAULT_LOGIN_REDIRECT.to_string()))
    }
}
