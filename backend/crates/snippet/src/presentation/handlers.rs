//! HTTP Handlers

use std::sync::Arc;

use auth::{CsrfForm, Session, TemplateData};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use platform::response::ResponseMode;
use platform::template::HtmlTemplate;

use crate::application::{CreateSnippetUseCase, LatestSnippetsUseCase, ShowSnippetUseCase};
use crate::domain::repository::SnippetRepository;
use crate::error::SnippetResult;
use crate::presentation::forms::SnippetCreateForm;
use crate::presentation::views::{CreateFragment, CreatePage, HomePage, SnippetRow, ViewPage};

/// Shared state for snippet handlers
pub struct SnippetAppState<N> {
    pub snippets: Arc<N>,
}

impl<N> Clone for SnippetAppState<N> {
    fn clone(&self) -> Self {
        Self {
            snippets: Arc::clone(&self.snippets),
        }
    }
}

impl<N> SnippetAppState<N>
where
    N: SnippetRepository + Sync + 'static,
{
    pub fn new(snippets: N) -> Self {
        Self {
            snippets: Arc::new(snippets),
        }
    }
}

/// GET /
pub async fn home<N>(
    State(state): State<SnippetAppState<N>>,
    session: Session,
) -> SnippetResult<Response>
where
    N: SnippetRepository + Sync + 'static,
{
    let snippets = LatestSnippetsUseCase::new(state.snippets.clone())
        .execute()
        .await?;

    Ok(HtmlTemplate(HomePage {
        data: TemplateData::new(&session),
        snippets: snippets.into_iter().map(SnippetRow::from).collect(),
    })
    .into_response())
}

/// GET /snippet/view/{id}
pub async fn view<N>(
    State(state): State<SnippetAppState<N>>,
    session: Session,
    Path(raw_id): Path<String>,
) -> SnippetResult<Response>
where
    N: SnippetRepository + Sync + 'static,
{
    let snippet = ShowSnippetUseCase::new(state.snippets.clone())
        .execute(&raw_id)
        .await?;

    Ok(HtmlTemplate(ViewPage {
        data: TemplateData::new(&session),
        snippet: snippet.into(),
    })
    .into_response())
}

/// GET /snippet/create
pub async fn create_form(session: Session) -> Response {
    let form = SnippetCreateForm::blank();
    HtmlTemplate(CreatePage {
        data: TemplateData::new(&session),
        csrf_token: session.csrf_token(),
        form: &form,
    })
    .into_response()
}

/// POST /snippet/create
pub async fn create<N>(
    State(state): State<SnippetAppState<N>>,
    mode: ResponseMode,
    session: Session,
    CsrfForm(mut form): CsrfForm<SnippetCreateForm>,
) -> SnippetResult<Response>
where
    N: SnippetRepository + Sync + 'static,
{
    form.validate();

    if !form.validator.valid() {
        return Ok(mode.render(
            StatusCode::UNPROCESSABLE_ENTITY,
            || CreatePage {
                data: TemplateData::new(&session),
                csrf_token: session.csrf_token(),
                form: &form,
            },
            || CreateFragment {
                csrf_token: session.csrf_token(),
                form: &form,
            },
        ));
    }

    let id = CreateSnippetUseCase::new(state.snippets.clone())
        .execute(form.to_new_snippet())
        .await?;

    session.put_flash("Snippet successfully created!");
    Ok(mode.redirect(&format!("/snippet/view/{id}")))
}
