//! Snippet Views

use askama::Template;
use auth::TemplateData;
use chrono::{DateTime, Utc};

use crate::domain::entity::Snippet;
use crate::presentation::forms::SnippetCreateForm;

fn human_date(at: &DateTime<Utc>) -> String {
    at.format("%d %b %Y at %H:%M").to_string()
}

/// Snippet as displayed
#[derive(Debug, Clone)]
pub struct SnippetRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: String,
    pub expires: String,
}

impl From<Snippet> for SnippetRow {
    fn from(snippet: Snippet) -> Self {
        Self {
            id: snippet.id.value(),
            created: human_date(&snippet.created_at),
            expires: human_date(&snippet.expires_at),
            title: snippet.title,
            content: snippet.content,
        }
    }
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomePage {
    pub data: TemplateData,
    pub snippets: Vec<SnippetRow>,
}

#[derive(Template)]
#[template(path = "pages/view.html")]
pub struct ViewPage {
    pub data: TemplateData,
    pub snippet: SnippetRow,
}

#[derive(Template)]
#[template(path = "pages/create.html")]
pub struct CreatePage<'a> {
    pub data: TemplateData,
    pub csrf_token: String,
    pub form: &'a SnippetCreateForm,
}

#[derive(Template)]
#[template(path = "partials/create_form.html")]
pub struct CreateFragment<'a> {
    pub csrf_token: String,
    pub form: &'a SnippetCreateForm,
}
