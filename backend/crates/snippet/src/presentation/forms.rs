//! Snippet Create Form

use kernel::validation::{Validator, rules};
use serde::Deserialize;

use crate::domain::entity::{NewSnippet, PERMITTED_EXPIRY_DAYS};

/// Longest accepted title, in characters
pub const TITLE_MAX_CHARS: usize = 100;

/// Pre-selected lifetime on a fresh form
pub const DEFAULT_EXPIRY_DAYS: i32 = 365;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SnippetCreateForm {
    pub title: String,
    pub content: String,
    pub expires: i32,
    #[serde(skip)]
    pub validator: Validator,
}

impl SnippetCreateForm {
    /// Blank form as first shown to the user
    pub fn blank() -> Self {
        Self {
            expires: DEFAULT_EXPIRY_DAYS,
            ..Self::default()
        }
    }

    pub fn validate(&mut self) {
        let v = &mut self.validator;
        v.check_field(
            rules::not_blank(&self.title),
            "title",
            "This field cannot be blank",
        );
        v.check_field(
            rules::max_chars(&self.title, TITLE_MAX_CHARS),
            "title",
            "This field cannot be more than 100 characters",
        );
        v.check_field(
            rules::not_blank(&self.content),
            "content",
            "This field cannot be blank",
        );
        v.check_field(
            rules::permitted_value(&self.expires, &PERMITTED_EXPIRY_DAYS),
            "expires",
            "This field must equal 1, 7 or 365",
        );
    }

    pub fn to_new_snippet(&self) -> NewSnippet {
        NewSnippet {
            title: self.title.clone(),
            content: self.content.clone(),
            expires_days: self.expires,
        }
    }
}
