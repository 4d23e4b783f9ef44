//! Change Password Use Case

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::credentials::{self, SharedHasher};
use crate::application::session::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Change password use case
pub struct ChangePasswordUseCase<U, S> {
    users: Arc<U>,
    sessions: Arc<S>,
    hasher: SharedHasher,
}

impl<U, S> ChangePasswordUseCase<U, S>
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

    /// Replace the signed-in user's password.
    ///
    /// `InvalidCredentials` means `current` did not match; nothing is changed.
    pub async fn execute(
        &self,
        session: &Session,
        current: ClearTextPassword,
        new: ClearTextPassword,
    ) -> AuthResult<()> {
        let user_id = session.user_id().ok_or(AuthError::UserNotFound)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !credentials::verify(&self.hasher, current, user.hashed_password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let hashed = credentials::hash(&self.hasher, new).await?;
        self.users.update_password_hash(user_id, &hashed).await?;

        session.renew_token(self.sessions.as_ref()).await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{session::SessionRecord, user::NewUser};
    use crate::domain::value_object::{email::Email, session_token::SessionToken};
    use crate::infra::memory::{MemorySessionStore, MemoryUserRepository};
    use chrono::Duration;
    use platform::password::{Argon2Hasher, PasswordHasher};

    struct Fixture {
        use_case: ChangePasswordUseCase<MemoryUserRepository, MemorySessionStore>,
        users: Arc<MemoryUserRepository>,
        session: Session,
        token: SessionToken,
        hasher: SharedHasher,
    }

    async fn fixture() -> Fixture {
        let hasher: SharedHasher = Arc::new(Argon2Hasher::low_cost());
        let users = Arc::new(MemoryUserRepository::new());
        let sessions = Arc::new(MemorySessionStore::new());

        let id = users
            .create(&NewUser {
                name: "Alice".into(),
                email: Email::parse("alice@example.com").unwrap(),
                hashed_password: hasher.hash(&ClearTextPassword::new("old-password")).unwrap(),
            })
            .await
            .unwrap();

        let token = SessionToken::generate();
        let mut record = SessionRecord::new(Duration::hours(1));
        record.data.user_id = Some(id);
        sessions.insert(&token, &record).await.unwrap();

        Fixture {
            use_case: ChangePasswordUseCase::new(users.clone(), sessions, hasher.clone()),
            users,
            session: Session::loaded(token.clone(), record, Duration::hours(1)),
            token,
            hasher,
        }
    }

    async fn verifies(f: &Fixture, password: &str) -> bool {
        let id = f.session.user_id().unwrap();
        let user = f.users.find_by_id(id).await.unwrap().unwrap();
        f.hasher
            .verify(&ClearTextPassword::new(password), &user.hashed_password)
    }

    #[tokio::test]
    async fn test_change_password_renews_session() {
        let f = fixture().await;
        f.use_case
            .execute(
                &f.session,
                ClearTextPassword::new("old-password"),
                ClearTextPassword::new("new-password"),
            )
            .await
            .unwrap();

        assert!(verifies(&f, "new-password").await);
        assert!(!verifies(&f, "old-password").await);
        assert_ne!(f.session.commit().token, f.token);
        assert!(f.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_wrong_current_password_changes_nothing() {
        let f = fixture().await;
        let err = f
            .use_case
            .execute(
                &f.session,
                ClearTextPassword::new("guess"),
                ClearTextPassword::new("new-password"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(verifies(&f, "old-password").await);
        assert_eq!(f.session.commit().token, f.token);
    }
}
