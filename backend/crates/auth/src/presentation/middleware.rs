//! Session and Auth Middleware
//!
//! - [`session_layer`] loads the visitor's session before the handler and
//!   commits it afterwards.
//! - [`authenticate`] drops identities whose user no longer exists.
//! - [`require_authentication`] guards routes that need a signed-in user.

use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::cookie::{extract_cookie, set_cookie_header};
use platform::response::ResponseMode;

use crate::application::CheckSessionUseCase;
use crate::application::session::{Session, SessionCommit};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult, SessionError};
use crate::presentation::handlers::{AuthAppState, LOGIN_PATH};

/// Load (or start) the session, run the handler, commit the session.
pub async fn session_layer<U, S>(
    State(state): State<AuthAppState<U, S>>,
    mut req: Request,
    next: Next,
) -> Response
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
{
    let ttl = state.config.session_ttl();

    let token = extract_cookie(req.headers(), &state.config.cookie.name)
        .and_then(|value| SessionToken::from_cookie(&value));

    let loaded = match token {
        Some(token) => match state.sessions.find(&token).await {
            Ok(record) => record.map(|record| (token, record)),
            Err(e) => return e.into_response(),
        },
        None => None,
    };

    let session = match loaded {
        Some((token, record)) => Session::loaded(token, record, ttl),
        None => Session::start(ttl),
    };

    req.extensions_mut().insert(session.clone());
    let mut response = next.run(req).await;

    let commit = session.commit();
    let send_cookie = match persist(state.sessions.as_ref(), &commit).await {
        Ok(send_cookie) => send_cookie,
        Err(e) => return e.into_response(),
    };

    if send_cookie {
        let mut cookie = state.config.cookie.clone();
        cookie.max_age_secs = Some(commit.record.remaining_secs());

        match set_cookie_header(&cookie, commit.token.as_str()) {
            Some(value) => {
                let headers = response.headers_mut();
                headers.append(header::SET_COOKIE, value);
                headers.append(header::VARY, HeaderValue::from_static("Cookie"));
            }
            None => {
                return AuthError::Internal("session cookie is not a valid header".to_string())
                    .into_response();
            }
        }
    }

    response
}

/// Write the session back. Returns whether the client must get the token.
async fn persist<S>(store: &S, commit: &SessionCommit) -> AuthResult<bool>
where
    S: SessionRepository + Sync,
{
    if commit.is_new {
        if !commit.dirty {
            // nothing worth keeping
            return Ok(false);
        }
        store.insert(&commit.token, &commit.record).await?;
        return Ok(true);
    }

    if commit.dirty && !store.update(&commit.token, &commit.record).await? {
        // renewed or expired under a concurrent request; never resurrect it
        tracing::warn!(
            token = ?commit.token,
            lost_flash = commit.record.data.flash.is_some(),
            "Dropped commit for a stale session token"
        );
        return Ok(false);
    }

    Ok(commit.token_changed)
}

/// Drop the identity of a session whose user was deleted.
pub async fn authenticate<U, S>(
    State(state): State<AuthAppState<U, S>>,
    req: Request,
    next: Next,
) -> Response
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
{
    let Some(session) = req.extensions().get::<Session>().cloned() else {
        return AuthError::Session(SessionError::MissingLayer).into_response();
    };

    if let Err(e) = CheckSessionUseCase::new(state.users.clone())
        .execute(&session)
        .await
    {
        return e.into_response();
    }

    next.run(req).await
}

/// Anonymous visitors are sent to the login page. A GET target is remembered
/// so login can bring them back.
pub async fn require_authentication(
    mode: ResponseMode,
    session: Session,
    req: Request,
    next: Next,
) -> Response {
    if !session.is_authenticated() {
        if req.method() == Method::GET {
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            session.set_redirect_after_login(target);
        }
        return mode.redirect(LOGIN_PATH);
    }

    let mut response = next.run(req).await;
    // pages behind login must not be cached by the browser
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
