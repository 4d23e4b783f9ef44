//! Router Composition
//!
//! Merges the feature routers, adds the site-wide pages, static files and the
//! layers every request passes through.

use std::path::Path;

use askama::Template;
use auth::domain::repository::{SessionRepository, UserRepository};
use auth::{AuthAppState, Session, TemplateData};
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use platform::template::HtmlTemplate;
use snippet::SnippetAppState;
use snippet::domain::SnippetRepository;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Template)]
#[template(path = "pages/about.html")]
struct AboutPage {
    data: TemplateData,
}

#[derive(Template)]
#[template(path = "pages/not_found.html")]
struct NotFoundPage {
    data: TemplateData,
}

/// GET /about
async fn about(session: Session) -> Response {
    HtmlTemplate(AboutPage {
        data: TemplateData::new(&session),
    })
    .into_response()
}

/// GET /ping
async fn ping() -> &'static str {
    "OK"
}

async fn not_found(session: Session) -> Response {
    (
        StatusCode::NOT_FOUND,
        HtmlTemplate(NotFoundPage {
            data: TemplateData::new(&session),
        }),
    )
        .into_response()
}

/// The whole application
pub fn build_app<U, S, N>(
    auth_state: AuthAppState<U, S>,
    snippets: SnippetAppState<N>,
    static_dir: &Path,
) -> Router
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
    N: SnippetRepository + Sync + 'static,
{
    let pages = Router::new()
        .route("/about", get(about))
        .merge(snippet::snippet_router(snippets))
        .merge(auth::auth_router(auth_state.clone()))
        .fallback(not_found);

    auth::session_layers(pages, auth_state)
        // static files and health check need no session
        .route("/ping", get(ping))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}
