//! Check Session Use Case
//!
//! Confirms that the identity stored in a session still names an existing user.

use std::sync::Arc;

use crate::application::session::Session;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase<U> {
    users: Arc<U>,
}

impl<U> CheckSessionUseCase<U>
where
    U: UserRepository + Sync,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// The authenticated user, if any. An identity whose user has been
    /// deleted is removed from the session and the visitor is anonymous.
    pub async fn execute(&self, session: &Session) -> AuthResult<Option<UserId>> {
        let Some(user_id) = session.user_id() else {
            return Ok(None);
        };

        if self.users.exists(user_id).await? {
            return Ok(Some(user_id));
        }

        tracing::warn!(user_id = %user_id, "Session refers to a missing user, signing out");
        session.remove_user_id();
        Ok(None)
    }
}
