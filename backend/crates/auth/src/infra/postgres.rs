//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entity::{
    session::{SessionData, SessionRecord},
    user::{NewUser, User},
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, session_token::SessionToken, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `users.email`
const USERS_EMAIL_UNIQUE: &str = "users_uc_email";

// ============================================================================
// User Repository Implementation
// ============================================================================

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<UserId> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, email, hashed_password, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.hashed_password.as_phc_string())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => Ok(UserId::new(id)),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some(USERS_EMAIL_UNIQUE) =>
            {
                Err(AuthError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, hashed_password, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, hashed_password, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists(&self, id: UserId) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(id.value())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_password_hash(&self, id: UserId, hash: &HashedPassword) -> AuthResult<()> {
        let updated = sqlx::query("UPDATE users SET hashed_password = $2 WHERE id = $1")
            .bind(id.value())
            .bind(hash.as_phc_string())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    hashed_password: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            id: UserId::new(self.id),
            name: self.name,
            email: Email::from_db(self.email),
            hashed_password: HashedPassword::from_phc_string(self.hashed_password)?,
            created_at: self.created_at,
        })
    }
}

// ============================================================================
// Session Store Implementation
// ============================================================================

/// PostgreSQL-backed session store
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionRepository for PgSessionStore {
    async fn find(&self, token: &SessionToken) -> AuthResult<Option<SessionRecord>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT data, expires_at
            FROM sessions
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token.digest().as_slice())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_record))
    }

    async fn insert(&self, token: &SessionToken, record: &SessionRecord) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token_hash, data, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token.digest().as_slice())
        .bind(Json(&record.data))
        .bind(record.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, token: &SessionToken, record: &SessionRecord) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE sessions SET
                data = $2,
                expires_at = $3
            WHERE token_hash = $1
            "#,
        )
        .bind(token.digest().as_slice())
        .bind(Json(&record.data))
        .bind(record.expires_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn rotate(
        &self,
        old: &SessionToken,
        new: &SessionToken,
        record: &SessionRecord,
    ) -> AuthResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Row lock: a concurrent rotation of `old` waits here, then deletes nothing.
        let removed = sqlx::query_scalar::<_, Vec<u8>>(
            "DELETE FROM sessions WHERE token_hash = $1 RETURNING token_hash",
        )
        .bind(old.digest().as_slice())
        .fetch_optional(&mut *tx)
        .await?;

        if removed.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO sessions (token_hash, data, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(new.digest().as_slice())
        .bind(Json(&record.data))
        .bind(record.expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    data: Json<SessionData>,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_record(self) -> SessionRecord {
        SessionRecord {
            data: self.data.0,
            expires_at: self.expires_at,
        }
    }
}
