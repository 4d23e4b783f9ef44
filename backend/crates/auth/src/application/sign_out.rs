//! Sign Out Use Case

use std::sync::Arc;

use crate::application::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

pub const LOGGED_OUT_FLASH: &str = "You've been logged out successfully!";

/// Sign out use case
pub struct SignOutUseCase<S> {
    sessions: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository + Sync,
{
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }

    /// Drop the identity under a new token and leave a notice for the next page
    pub async fn execute(&self, session: &Session) -> AuthResult<()> {
        let user_id = session.user_id();

        session.renew_token(self.sessions.as_ref()).await?;
        session.remove_user_id();
        session.put_flash(LOGGED_OUT_FLASH);

        if let Some(user_id) = user_id {
            tracing::info!(user_id = %user_id, "User signed out");
        }
        Ok(())
    }
}
