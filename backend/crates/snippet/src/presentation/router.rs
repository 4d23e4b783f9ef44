//! Snippet Router

use auth::middleware::require_authentication;
use axum::{Router, middleware, routing::get};

use crate::domain::repository::SnippetRepository;
use crate::presentation::handlers::{self, SnippetAppState};

/// Home, view and create routes. Expects the auth session layers around the
/// merged application router.
pub fn snippet_router<N>(state: SnippetAppState<N>) -> Router
where
    N: SnippetRepository + Sync + 'static,
{
    let protected = Router::new()
        .route(
            "/snippet/create",
            get(handlers::create_form).post(handlers::create::<N>),
        )
        .route_layer(middleware::from_fn(require_authentication));

    Router::new()
        .route("/", get(handlers::home::<N>))
        .route("/snippet/view/{id}", get(handlers::view::<N>))
        .merge(protected)
        .with_state(state)
}
