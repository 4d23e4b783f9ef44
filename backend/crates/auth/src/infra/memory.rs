//! In-memory Repository Implementations
//!
//! Used when no database is configured, and by the tests. Each store keeps its
//! table behind one `tokio::sync::RwLock`; every operation is a single lock
//! section, which is what makes `rotate` atomic.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use platform::password::HashedPassword;
use tokio::sync::RwLock;

use crate::domain::entity::{
    session::SessionRecord,
    user::{NewUser, User},
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, session_token::SessionToken, user_id::UserId};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Default)]
struct UserTable {
    next_id: i64,
    rows: BTreeMap<UserId, User>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<UserId> {
        let mut table = self.table.write().await;

        // unique constraint on email
        if table.rows.values().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }

        table.next_id += 1;
        let id = UserId::new(table.next_id);
        table.rows.insert(
            id,
            User {
                id,
                name: user.name.clone(),
                email: user.email.clone(),
                hashed_password: user.hashed_password.clone(),
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| &u.email == email).cloned())
    }

    async fn exists(&self, id: UserId) -> AuthResult<bool> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let table = self.table.read().await;
        Ok(table.rows.values().any(|u| &u.email == email))
    }

    async fn update_password_hash(&self, id: UserId, hash: &HashedPassword) -> AuthResult<()> {
        let mut table = self.table.write().await;
        let user = table.rows.get_mut(&id).ok_or(AuthError::UserNotFound)?;
        user.hashed_password = hash.clone();
        Ok(())
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    table: Arc<RwLock<HashMap<[u8; 32], SessionRecord>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl SessionRepository for MemorySessionStore {
    async fn find(&self, token: &SessionToken) -> AuthResult<Option<SessionRecord>> {
        let table = self.table.read().await;
        Ok(table
            .get(&token.digest())
            .filter(|record| !record.is_expired())
            .cloned())
    }

    async fn insert(&self, token: &SessionToken, record: &SessionRecord) -> AuthResult<()> {
        self.table
            .write()
            .await
            .insert(token.digest(), record.clone());
        Ok(())
    }

    async fn update(&self, token: &SessionToken, record: &SessionRecord) -> AuthResult<bool> {
        let mut table = self.table.write().await;
        match table.get_mut(&token.digest()) {
            Some(stored) => {
                *stored = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn rotate(
        &self,
        old: &SessionToken,
        new: &SessionToken,
        record: &SessionRecord,
    ) -> AuthResult<bool> {
        let mut table = self.table.write().await;
        if table.remove(&old.digest()).is_none() {
            return Ok(false);
        }
        table.insert(new.digest(), record.clone());
        Ok(true)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut table = self.table.write().await;
        let before = table.len();
        table.retain(|_, record| !record.is_expired());
        let deleted = (before - table.len()) as u64;

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");
        Ok(deleted)
    }
}
