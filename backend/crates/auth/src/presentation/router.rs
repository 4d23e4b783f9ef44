//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{authenticate, require_authentication, session_layer};

/// Signup, login, logout and account routes.
///
/// The session layers are not included; wrap the merged application router
/// with [`session_layers`] once.
pub fn auth_router<U, S>(state: AuthAppState<U, S>) -> Router
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
{
    let protected = Router::new()
        .route("/user/logout", post(handlers::logout::<U, S>))
        .route("/account/view", get(handlers::account_view::<U, S>))
        .route(
            "/account/password/update",
            get(handlers::password_form).post(handlers::password_update::<U, S>),
        )
        .route_layer(middleware::from_fn(require_authentication));

    Router::new()
        .route(
            "/user/signup",
            get(handlers::signup_form).post(handlers::signup::<U, S>),
        )
        .route(
            "/user/login",
            get(handlers::login_form).post(handlers::login::<U, S>),
        )
        .merge(protected)
        .with_state(state)
}

/// Wrap `router` with session loading/committing and the identity check.
///
/// The session layer is outermost so that it commits after every inner layer
/// and handler has run.
pub fn session_layers<U, S>(router: Router, state: AuthAppState<U, S>) -> Router
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
{
    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<U, S>,
        ))
        .layer(middleware::from_fn_with_state(state, session_layer::<U, S>))
}
