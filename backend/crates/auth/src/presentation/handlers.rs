//! HTTP Handlers
//!
//! Every POST handler follows the same shape: decode (400) and CSRF check (400)
//! in the extractor, validate, run the use case, then either redirect or
//! re-render with 422 through [`ResponseMode`].

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use platform::password::{ClearTextPassword, PasswordHasher};
use platform::response::ResponseMode;
use platform::template::HtmlTemplate;

use crate::application::config::AuthConfig;
use crate::application::credentials::SharedHasher;
use crate::application::session::Session;
use crate::application::{
    ChangePasswordUseCase, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::presentation::extract::CsrfForm;
use crate::presentation::forms::{LoginForm, LogoutForm, PasswordUpdateForm, SignupForm};
use crate::presentation::views::{
    AccountPage, LoginFragment, LoginPage, PasswordFragment, PasswordPage, SignupFragment,
    SignupPage, TemplateData,
};

pub const LOGIN_PATH: &str = "/user/login";

/// Shared state for auth handlers and middleware
pub struct AuthAppState<U, S> {
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub hasher: SharedHasher,
    pub config: Arc<AuthConfig>,
}

// Manual impl: only the `Arc`s are cloned, `U`/`S` need not be `Clone`.
impl<U, S> Clone for AuthAppState<U, S> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            sessions: Arc::clone(&self.sessions),
            hasher: Arc::clone(&self.hasher),
            config: Arc::clone(&self.config),
        }
    }
}

impl<U, S> AuthAppState<U, S>
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
{
    pub fn new(users: U, sessions: S, hasher: impl PasswordHasher, config: AuthConfig) -> Self {
        Self {
            users: Arc::new(users),
            sessions: Arc::new(sessions),
            hasher: Arc::new(hasher),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// GET /user/signup
pub async fn signup_form(session: Session) -> Response {
    let form = SignupForm::default();
    HtmlTemplate(SignupPage {
        data: TemplateData::new(&session),
        csrf_token: session.csrf_token(),
        form: &form,
    })
    .into_response()
}

/// POST /user/signup
pub async fn signup<U, S>(
    State(state): State<AuthAppState<U, S>>,
    mode: ResponseMode,
    session: Session,
    CsrfForm(mut form): CsrfForm<SignupForm>,
) -> AuthResult<Response>
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
{
    form.validate();

    // a valid form always carries a parseable email
    let email = Email::parse(&form.email).filter(|_| form.validator.valid());

    if let Some(email) = email {
        let input = SignUpInput {
            name: form.name.clone(),
            email,
            password: ClearTextPassword::new(std::mem::take(&mut form.password)),
        };

        match SignUpUseCase::new(state.users.clone(), state.hasher.clone())
            .execute(input)
            .await
        {
            Ok(_) => {
                session.put_flash("Your signup was successful. Please log in.");
                return Ok(mode.redirect(LOGIN_PATH));
            }
            Err(AuthError::DuplicateEmail) => form
                .validator
                .add_field_error("email", "Email address is already in use"),
            Err(e) => return Err(e),
        }
    }

    form.password.clear();
    Ok(mode.render(
        StatusCode::UNPROCESSABLE_ENTITY,
        || SignupPage {
            data: TemplateData::new(&session),
            csrf_token: session.csrf_token(),
            form: &form,
        },
        || SignupFragment {
            csrf_token: session.csrf_token(),
            form: &form,
        },
    ))
}

// ============================================================================
// Login
// ============================================================================

/// GET /user/login
pub async fn login_form(session: Session) -> Response {
    let form = LoginForm::default();
    HtmlTemplate(LoginPage {
        data: TemplateData::new(&session),
        csrf_token: session.csrf_token(),
        form: &form,
    })
    .into_response()
}

/// POST /user/login
pub async fn login<U, S>(
    State(state): State<AuthAppState<U, S>>,
    mode: ResponseMode,
    session: Session,
    CsrfForm(mut form): CsrfForm<LoginForm>,
) -> AuthResult<Response>
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
{
    form.validate();

    if form.validator.valid() {
        let use_case = SignInUseCase::new(
            state.users.clone(),
            state.sessions.clone(),
            state.hasher.clone(),
        );
        let password = ClearTextPassword::new(std::mem::take(&mut form.password));

        match use_case.authenticate(&form.email, password).await {
            Ok(user_id) => {
                let target = use_case.establish(&session, user_id).await?;
                return Ok(mode.redirect(&target));
            }
            Err(AuthError::InvalidCredentials) => form
                .validator
                .add_non_field_error("Email or password is incorrect"),
            Err(e) => return Err(e),
        }
    }

    form.password.clear();
    Ok(mode.render(
        StatusCode::UNPROCESSABLE_ENTITY,
        || LoginPage {
            data: TemplateData::new(&session),
            csrf_token: session.csrf_token(),
            form: &form,
        },
        || LoginFragment {
            csrf_token: session.csrf_token(),
            form: &form,
        },
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /user/logout
pub async fn logout<U, S>(
    State(state): State<AuthAppState<U, S>>,
    mode: ResponseMode,
    session: Session,
    CsrfForm(_): CsrfForm<LogoutForm>,
) -> AuthResult<Response>
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
{
    SignOutUseCase::new(state.sessions.clone())
        .execute(&session)
        .await?;

    Ok(mode.redirect("/"))
}

// ============================================================================
// Account
// ============================================================================

/// GET /account/view
pub async fn account_view<U, S>(
    State(state): State<AuthAppState<U, S>>,
    mode: ResponseMode,
    session: Session,
) -> AuthResult<Response>
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
{
    let user = match session.user_id() {
        Some(id) => state.users.find_by_id(id).await?,
        None => None,
    };

    let Some(user) = user else {
        return Ok(mode.redirect(LOGIN_PATH));
    };

    Ok(HtmlTemplate(AccountPage {
        data: TemplateData::new(&session),
        name: user.name,
        email: user.email,
        joined: user.created_at,
    })
    .into_response())
}

/// GET /account/password/update
pub async fn password_form(session: Session) -> Response {
    let form = PasswordUpdateForm::default();
    HtmlTemplate(PasswordPage {
        data: TemplateData::new(&session),
        csrf_token: session.csrf_token(),
        form: &form,
    })
    .into_response()
}

/// POST /account/password/update
pub async fn password_update<U, S>(
    State(state): State<AuthAppState<U, S>>,
    mode: ResponseMode,
    session: Session,
    CsrfForm(mut form): CsrfForm<PasswordUpdateForm>,
) -> AuthResult<Response>
where
    U: UserRepository + Sync + 'static,
    S: SessionRepository + Sync + 'static,
{
    form.validate();

    if form.validator.valid() {
        let use_case = ChangePasswordUseCase::new(
            state.users.clone(),
            state.sessions.clone(),
            state.hasher.clone(),
        );
        let current = ClearTextPassword::new(std::mem::take(&mut form.current_password));
        let new = ClearTextPassword::new(std::mem::take(&mut form.new_password));

        match use_case.execute(&session, current, new).await {
            Ok(()) => {
                session.put_flash("Your password has been updated!");
                return Ok(mode.redirect("/account/view"));
            }
            Err(AuthError::InvalidCredentials) => form
                .validator
                .add_field_error("current_password", "Current password is incorrect"),
            Err(e) => return Err(e),
        }
    }

    form.current_password.clear();
    form.new_password.clear();
    form.confirm_password.clear();
    Ok(mode.render(
        StatusCode::UNPROCESSABLE_ENTITY,
        || PasswordPage {
            data: TemplateData::new(&session),
            csrf_token: session.csrf_token(),
            form: &form,
        },
        || PasswordFragment {
            csrf_token: session.csrf_token(),
            form: &form,
        },
    ))
}
