//! Request-scoped Session Handle
//!
//! The session layer loads (or starts) one [`Session`] per request and puts it in
//! the request extensions. Handlers and use cases read and write through it; the
//! layer commits the result to the [`SessionRepository`] once the handler has
//! produced its response.
//!
//! Accessors are synchronous. Only [`Session::renew_token`] talks to the store,
//! because renewal must be atomic with respect to other requests carrying the
//! same token.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Duration;
use platform::crypto::constant_time_eq;

use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{session_token::SessionToken, user_id::UserId};
use crate::error::AuthResult;

#[derive(Debug)]
struct SessionState {
    token: SessionToken,
    record: SessionRecord,
    lifetime: Duration,
    /// Not yet in the store
    is_new: bool,
    /// Changed since load / last store write
    dirty: bool,
    /// Cookie must be (re)sent
    token_changed: bool,
}

/// What the session layer writes back after the handler ran
#[derive(Debug)]
pub struct SessionCommit {
    pub token: SessionToken,
    pub record: SessionRecord,
    pub is_new: bool,
    pub dirty: bool,
    pub token_changed: bool,
}

/// Handle to the current visitor's session. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<Mutex<SessionState>>,
}

impl Session {
    /// Session loaded from the store
    pub fn loaded(token: SessionToken, record: SessionRecord, lifetime: Duration) -> Self {
        Self::from_state(SessionState {
            token,
            record,
            lifetime,
            is_new: false,
            dirty: false,
            token_changed: false,
        })
    }

    /// Fresh anonymous session. Persisted only if something is written to it.
    pub fn start(lifetime: Duration) -> Self {
        Self::from_state(SessionState {
            token: SessionToken::generate(),
            record: SessionRecord::new(lifetime),
            lifetime,
            is_new: true,
            dirty: false,
            token_changed: true,
        })
    }

    fn from_state(state: SessionState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // No invariant spans a panic inside these short critical sections.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Identity
    // ========================================================================

    pub fn user_id(&self) -> Option<UserId> {
        self.state().record.data.user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id().is_some()
    }

    /// Callers must renew the token first.
    pub fn set_user_id(&self, id: UserId) {
        let mut state = self.state();
        state.record.data.user_id = Some(id);
        state.dirty = true;
    }

    pub fn remove_user_id(&self) {
        let mut state = self.state();
        if state.record.data.user_id.take().is_some() {
            state.dirty = true;
        }
    }

    // ========================================================================
    // Flash
    // ========================================================================

    /// Replaces any flash not yet shown
    pub fn put_flash(&self, message: impl Into<String>) {
        let mut state = self.state();
        state.record.data.flash = Some(message.into());
        state.dirty = true;
    }

    pub fn pop_flash(&self) -> Option<String> {
        let mut state = self.state();
        let flash = state.record.data.flash.take();
        if flash.is_some() {
            state.dirty = true;
        }
        flash
    }

    // ========================================================================
    // Post-login redirect
    // ========================================================================

    pub fn set_redirect_after_login(&self, path: impl Into<String>) {
        let mut state = self.state();
        state.record.data.redirect_after_login = Some(path.into());
        state.dirty = true;
    }

    pub fn pop_redirect_after_login(&self) -> Option<String> {
        let mut state = self.state();
        let path = state.record.data.redirect_after_login.take();
        if path.is_some() {
            state.dirty = true;
        }
        path
    }

    // ========================================================================
    // CSRF
    // ========================================================================

    /// The anti-forgery token. Handing it out to a form makes a new session
    /// worth persisting, otherwise the submission could never be checked.
    pub fn csrf_token(&self) -> String {
        let mut state = self.state();
        if state.is_new {
            state.dirty = true;
        }
        state.record.data.csrf_token.clone()
    }

    /// Constant-time comparison with a submitted token
    pub fn csrf_matches(&self, submitted: &str) -> bool {
        let state = self.state();
        constant_time_eq(
            state.record.data.csrf_token.as_bytes(),
            submitted.as_bytes(),
        )
    }

    // ========================================================================
    // Renewal
    // ========================================================================

    /// Issue a new token for the same data and invalidate the old one.
    ///
    /// Must run before every change of authentication state. If another request
    /// already renewed the token this one was loaded with, the stale data is
    /// dropped and the request continues on a fresh anonymous session.
    pub async fn renew_token<S>(&self, store: &S) -> AuthResult<()>
    where
        S: SessionRepository + Sync,
    {
        let new_token = SessionToken::generate();

        let (old_token, record) = {
            let mut state = self.state();
            if state.is_new {
                // never stored, nothing to invalidate
                state.token = new_token;
                state.token_changed = true;
                return Ok(());
            }
            (state.token.clone(), state.record.clone())
        };

        let rotated = store.rotate(&old_token, &new_token, &record).await?;

        let mut state = self.state();
        if rotated {
            tracing::debug!(old = ?old_token, new = ?new_token, "Session token renewed");
            state.token = new_token;
            state.token_changed = true;
            // `rotate` stored everything written so far
            state.dirty = state.record != record;
        } else {
            tracing::warn!(
                token = ?old_token,
                "Session was renewed by a concurrent request, starting a fresh session"
            );
            state.token = new_token;
            state.record = SessionRecord::new(state.lifetime);
            state.is_new = true;
            state.dirty = true;
            state.token_changed = true;
        }
        Ok(())
    }

    /// Snapshot for the session layer
    pub fn commit(&self) -> SessionCommit {
        let state = self.state();
        SessionCommit {
            token: state.token.clone(),
            record: state.record.clone(),
            is_new: state.is_new,
            dirty: state.dirty,
            token_changed: state.token_changed,
        }
    }
}
