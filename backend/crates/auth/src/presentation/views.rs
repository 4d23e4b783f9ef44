//! Views
//!
//! [`TemplateData`] is shared by every full page in the application. Page
//! structs wrap it together with their form; fragment structs carry only the
//! form and the anti-forgery token, for enhanced requests.

use askama::Template;
use chrono::{DateTime, Datelike, Utc};

use crate::application::session::Session;
use crate::domain::value_object::email::Email;
use crate::presentation::forms::{LoginForm, PasswordUpdateForm, SignupForm};

/// Data every full page needs (layout, navigation, flash)
#[derive(Debug, Clone)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    /// For the logout form in the navigation; empty for anonymous visitors
    pub csrf_token: String,
}

impl TemplateData {
    /// Consumes the pending flash message; build it only for pages that show it.
    ///
    /// Reading pages never makes an anonymous session worth storing: the
    /// token is only taken for signed-in visitors, whose session already exists.
    pub fn new(session: &Session) -> Self {
        let is_authenticated = session.is_authenticated();
        Self {
            current_year: Utc::now().year(),
            flash: session.pop_flash(),
            is_authenticated,
            csrf_token: if is_authenticated {
                session.csrf_token()
            } else {
                String::new()
            },
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Template)]
#[template(path = "pages/signup.html")]
pub struct SignupPage<'a> {
    pub data: TemplateData,
    pub csrf_token: String,
    pub form: &'a SignupForm,
}

#[derive(Template)]
#[template(path = "partials/signup_form.html")]
pub struct SignupFragment<'a> {
    pub csrf_token: String,
    pub form: &'a SignupForm,
}

// ============================================================================
// Login
// ============================================================================

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginPage<'a> {
    pub data: TemplateData,
    pub csrf_token: String,
    pub form: &'a LoginForm,
}

#[derive(Template)]
#[template(path = "partials/login_form.html")]
pub struct LoginFragment<'a> {
    pub csrf_token: String,
    pub form: &'a LoginForm,
}

// ============================================================================
// Account
// ============================================================================

#[derive(Template)]
#[template(path = "pages/account.html")]
pub struct AccountPage {
    pub data: TemplateData,
    pub name: String,
    pub email: Email,
    pub joined: DateTime<Utc>,
}

impl AccountPage {
    pub fn joined_display(&self) -> String {
        self.joined.format("%d %b %Y at %H:%M").to_string()
    }
}

#[derive(Template)]
#[template(path = "pages/password.html")]
pub struct PasswordPage<'a> {
    pub data: TemplateData,
    pub csrf_token: String,
    pub form: &'a PasswordUpdateForm,
}

#[derive(Template)]
#[template(path = "partials/password_form.html")]
pub struct PasswordFragment<'a> {
    pub csrf_token: String,
    pub form: &'a PasswordUpdateForm,
}
