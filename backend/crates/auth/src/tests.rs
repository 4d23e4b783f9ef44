//! Router-level tests for the auth flows
//! Every test drives the real router with in-memory stores.

#[cfg(test)]
mod support {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderValue, Request, header};
    use axum::response::Response;
    use platform::password::Argon2Hasher;
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::infra::memory::{MemorySessionStore, MemoryUserRepository};
    use crate::presentation::handlers::AuthAppState;
    use crate::presentation::router::{auth_router, session_layers};

    pub type TestState = AuthAppState<MemoryUserRepository, MemorySessionStore>;

    pub const PASSWORD: &str = "correct-horse-battery";

    pub fn app() -> (Router, TestState) {
        let state = AuthAppState::new(
            MemoryUserRepository::new(),
            MemorySessionStore::new(),
            Argon2Hasher::low_cost(),
            AuthConfig::development(),
        );
        let router = session_layers(auth_router(state.clone()), state.clone());
        (router, state)
    }

    pub async fn body_string(res: Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Value of the `session` cookie set by `res`, if any
    pub fn session_cookie(res: &Response) -> Option<String> {
        res.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|v| v.strip_prefix("session="))
            .map(|v| v.split(';').next().unwrap_or_default().to_string())
    }

    pub fn csrf_from(html: &str) -> String {
        let marker = r#"name="csrf_token" value=""#;
        let start = html.find(marker).expect("no csrf field in page") + marker.len();
        let len = html[start..].find('"').unwrap();
        html[start..start + len].to_string()
    }

    pub fn location(res: &Response) -> Option<&str> {
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// A browser: remembers the session cookie between requests
    pub struct Visitor {
        app: Router,
        pub cookie: Option<String>,
    }

    impl Visitor {
        pub fn new(app: &Router) -> Self {
            Self {
                app: app.clone(),
                cookie: None,
            }
        }

        pub async fn send(&mut self, mut req: Request<Body>) -> Response {
            if let Some(cookie) = &self.cookie {
                req.headers_mut().insert(
                    header::COOKIE,
                    HeaderValue::from_str(&format!("session={cookie}")).unwrap(),
                );
            }
            let res = self.app.clone().oneshot(req).await.unwrap();
            if let Some(cookie) = session_cookie(&res) {
                self.cookie = Some(cookie);
            }
            res
        }

        pub async fn get(&mut self, path: &str) -> Response {
            self.send(Request::get(path).body(Body::empty()).unwrap())
                .await
        }

        pub async fn post(&mut self, path: &str, body: String) -> Response {
            self.send(form_request(path, body, false)).await
        }

        pub async fn post_enhanced(&mut self, path: &str, body: String) -> Response {
            self.send(form_request(path, body, true)).await
        }

        /// Load a form page and return its anti-forgery token
        pub async fn csrf(&mut self, path: &str) -> String {
            let res = self.get(path).await;
            csrf_from(&body_string(res).await)
        }

        pub async fn sign_up(&mut self, email: &str) -> Response {
            let csrf = self.csrf("/user/signup").await;
            self.post(
                "/user/signup",
                format!("csrf_token={csrf}&name=Alice&email={email}&password={PASSWORD}"),
            )
            .await
        }

        pub async fn log_in(&mut self, email: &str, password: &str) -> Response {
            let csrf = self.csrf("/user/login").await;
            self.post(
                "/user/login",
                format!("csrf_token={csrf}&email={email}&password={password}"),
            )
            .await
        }
    }

    fn form_request(path: &str, body: String, enhanced: bool) -> Request<Body> {
        let mut builder = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if enhanced {
            builder = builder.header("HX-Request", "true");
        }
        builder.body(Body::from(body)).unwrap()
    }
}

#[cfg(test)]
mod signup_tests {
    use super::support::*;
    use axum::http::StatusCode;

    const EMAIL: &str = "alice%40example.com";

    #[tokio::test]
    async fn test_signup_redirects_to_login_with_flash() {
        let (app, state) = app();
        let mut visitor = Visitor::new(&app);

        let res = visitor.sign_up(EMAIL).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/user/login"));
        assert_eq!(state.users.len().await, 1);

        let page = body_string(visitor.get("/user/login").await).await;
        assert!(page.contains("Your signup was successful. Please log in."));

        // shown once
        let page = body_string(visitor.get("/user/login").await).await;
        assert!(!page.contains("Your signup was successful"));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_field_error() {
        let (app, state) = app();
        let mut visitor = Visitor::new(&app);
        visitor.sign_up(EMAIL).await;

        // same address, different case
        let res = visitor.sign_up("ALICE%40example.com").await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let page = body_string(res).await;
        assert!(page.contains("Email address is already in use"));
        assert_eq!(state.users.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_signup_keeps_input_but_not_password() {
        let (app, state) = app();
        let mut visitor = Visitor::new(&app);

        let csrf = visitor.csrf("/user/signup").await;
        let res = visitor
            .post(
                "/user/signup",
                format!("csrf_token={csrf}&name=Bob&email=not-an-email&password=short"),
            )
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let page = body_string(res).await;
        assert!(page.contains("This field must be a valid email address"));
        assert!(page.contains("This field must be at least 8 characters long"));
        assert!(page.contains(r#"value="Bob""#));
        assert!(!page.contains("short"));
        assert!(state.users.is_empty().await);
    }

    #[tokio::test]
    async fn test_enhanced_invalid_signup_returns_fragment() {
        let (app, state) = app();
        let mut visitor = Visitor::new(&app);

        let csrf = visitor.csrf("/user/signup").await;
        let res = visitor
            .post_enhanced(
                "/user/signup",
                format!("csrf_token={csrf}&name=&email={EMAIL}&password={PASSWORD}"),
            )
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.headers().get("HX-Redirect").is_none());

        let fragment = body_string(res).await;
        assert!(fragment.starts_with("<form"));
        assert!(!fragment.contains("<html"));
        assert!(fragment.contains("This field cannot be blank"));
        assert!(!fragment.contains(PASSWORD));
        assert!(state.users.is_empty().await);
    }

    #[tokio::test]
    async fn test_enhanced_signup_uses_hx_redirect() {
        let (app, state) = app();
        let mut visitor = Visitor::new(&app);

        let csrf = visitor.csrf("/user/signup").await;
        let res = visitor
            .post_enhanced(
                "/user/signup",
                format!("csrf_token={csrf}&name=Alice&email={EMAIL}&password={PASSWORD}"),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("HX-Redirect").unwrap(), "/user/login");
        assert!(location(&res).is_none());
        assert!(body_string(res).await.is_empty());
        assert_eq!(state.users.len().await, 1);
    }
}

#[cfg(test)]
mod login_tests {
    use super::support::*;
    use axum::http::{StatusCode, header};

    use crate::domain::repository::SessionRepository;
    use crate::domain::value_object::session_token::SessionToken;

    const EMAIL: &str = "alice%40example.com";

    async fn registered() -> (axum::Router, TestState) {
        let (app, state) = app();
        Visitor::new(&app).sign_up(EMAIL).await;
        (app, state)
    }

    #[tokio::test]
    async fn test_wrong_password_keeps_session_anonymous() {
        let (app, _state) = registered().await;
        let mut visitor = Visitor::new(&app);

        let res = visitor.log_in(EMAIL, "wrong-password").await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            body_string(res)
                .await
                .contains("Email or password is incorrect")
        );

        let res = visitor.get("/account/view").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/user/login"));
    }

    #[tokio::test]
    async fn test_unknown_email_looks_like_wrong_password() {
        let (app, _state) = registered().await;
        let mut visitor = Visitor::new(&app);

        let res = visitor.log_in("bob%40example.com", PASSWORD).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            body_string(res)
                .await
                .contains("Email or password is incorrect")
        );
    }

    #[tokio::test]
    async fn test_login_logout_renews_token_each_time() {
        let (app, state) = registered().await;
        let mut visitor = Visitor::new(&app);

        let csrf = visitor.csrf("/user/login").await;
        let anonymous = visitor.cookie.clone().unwrap();

        let res = visitor
            .post(
                "/user/login",
                format!("csrf_token={csrf}&email={EMAIL}&password={PASSWORD}"),
            )
            .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/snippet/create"));
        let signed_in = visitor.cookie.clone().unwrap();

        let res = visitor
            .post("/user/logout", format!("csrf_token={csrf}"))
            .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/"));
        let signed_out = visitor.cookie.clone().unwrap();

        assert_ne!(anonymous, signed_in);
        assert_ne!(signed_in, signed_out);
        assert_ne!(anonymous, signed_out);

        for old in [&anonymous, &signed_in] {
            let token = SessionToken::from_cookie(old).unwrap();
            assert!(state.sessions.find(&token).await.unwrap().is_none());
        }

        let token = SessionToken::from_cookie(&signed_out).unwrap();
        let record = state.sessions.find(&token).await.unwrap().unwrap();
        assert_eq!(record.data.user_id, None);
        assert!(record.data.flash.is_some());
    }

    #[tokio::test]
    async fn test_replayed_old_cookie_is_anonymous() {
        let (app, _state) = registered().await;
        let mut visitor = Visitor::new(&app);
        let csrf = visitor.csrf("/user/login").await;
        let anonymous = visitor.cookie.clone();

        visitor
            .post(
                "/user/login",
                format!("csrf_token={csrf}&email={EMAIL}&password={PASSWORD}"),
            )
            .await;

        let mut attacker = Visitor::new(&app);
        attacker.cookie = anonymous;
        let res = attacker.get("/account/view").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/user/login"));
    }

    #[tokio::test]
    async fn test_enhanced_failure_returns_fragment() {
        let (app, _state) = registered().await;
        let mut visitor = Visitor::new(&app);
        let csrf = visitor.csrf("/user/login").await;

        let res = visitor
            .post_enhanced(
                "/user/login",
                format!("csrf_token={csrf}&email={EMAIL}&password=wrong-password"),
            )
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.headers().get("HX-Redirect").is_none());

        let fragment = body_string(res).await;
        assert!(fragment.starts_with("<form"));
        assert!(!fragment.contains("<html"));
        assert!(fragment.contains("Email or password is incorrect"));
    }

    #[tokio::test]
    async fn test_enhanced_success_uses_hx_redirect() {
        let (app, _state) = registered().await;
        let mut visitor = Visitor::new(&app);
        let csrf = visitor.csrf("/user/login").await;

        let res = visitor
            .post_enhanced(
                "/user/login",
                format!("csrf_token={csrf}&email={EMAIL}&password={PASSWORD}"),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get("HX-Redirect").unwrap(),
            "/snippet/create"
        );
        assert!(res.headers().get(header::LOCATION).is_none());
    }

    #[tokio::test]
    async fn test_missing_or_wrong_csrf_is_rejected() {
        let (app, _state) = registered().await;
        let mut visitor = Visitor::new(&app);
        let _ = visitor.csrf("/user/login").await;

        let res = visitor
            .post(
                "/user/login",
                format!("email={EMAIL}&password={PASSWORD}"),
            )
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = visitor
            .post(
                "/user/login",
                format!("csrf_token=forged&email={EMAIL}&password={PASSWORD}"),
            )
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        // still anonymous
        let res = visitor.get("/account/view").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, _state) = app();
        let mut visitor = Visitor::new(&app);
        let csrf = visitor.csrf("/user/login").await;

        let res = visitor
            .post("/user/login", format!("csrf_token={csrf}&email=a%40b.com&email=c%40d.com"))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod protected_route_tests {
    use super::support::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};

    const EMAIL: &str = "alice%40example.com";

    #[tokio::test]
    async fn test_login_returns_to_requested_page() {
        let (app, _state) = app();
        let mut visitor = Visitor::new(&app);
        visitor.sign_up(EMAIL).await;

        let res = visitor.get("/account/view").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/user/login"));

        let res = visitor.log_in(EMAIL, PASSWORD).await;
        assert_eq!(location(&res), Some("/account/view"));

        let res = visitor.get("/account/view").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
        let page = body_string(res).await;
        assert!(page.contains("alice@example.com"));
        assert!(page.contains("Alice"));
    }

    #[tokio::test]
    async fn test_enhanced_anonymous_request_gets_hx_redirect() {
        let (app, _state) = app();
        let mut visitor = Visitor::new(&app);

        let req = Request::get("/account/view")
            .header("HX-Request", "true")
            .body(Body::empty())
            .unwrap();
        let res = visitor.send(req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("HX-Redirect").unwrap(), "/user/login");
    }

    #[tokio::test]
    async fn test_anonymous_logout_stores_nothing() {
        let (app, state) = app();
        let mut visitor = Visitor::new(&app);

        let res = visitor.post("/user/logout", String::new()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        // POST target is not remembered, so nothing was worth storing
        assert!(visitor.cookie.is_none());
        assert!(state.sessions.is_empty().await);
    }
}

#[cfg(test)]
mod password_tests {
    use super::support::*;
    use axum::http::StatusCode;

    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::email::Email;

    const EMAIL: &str = "alice%40example.com";

    async fn signed_in() -> (Visitor, TestState) {
        let (app, state) = app();
        let mut visitor = Visitor::new(&app);
        visitor.sign_up(EMAIL).await;
        visitor.log_in(EMAIL, PASSWORD).await;
        (visitor, state)
    }

    async fn stored_hash(state: &TestState) -> String {
        let email = Email::parse("alice@example.com").unwrap();
        let user = state.users.find_by_email(&email).await.unwrap().unwrap();
        user.hashed_password.as_phc_string().to_string()
    }

    #[tokio::test]
    async fn test_mismatched_confirmation_changes_nothing() {
        let (mut visitor, state) = signed_in().await;
        let before = stored_hash(&state).await;

        let csrf = visitor.csrf("/account/password/update").await;
        let res = visitor
            .post(
                "/account/password/update",
                format!(
                    "csrf_token={csrf}&current_password={PASSWORD}&new_password=brand-new-secret&confirm_password=other-secret"
                ),
            )
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_string(res).await.contains("Passwords do not match"));
        assert_eq!(stored_hash(&state).await, before);
    }

    #[tokio::test]
    async fn test_wrong_current_password() {
        let (mut visitor, state) = signed_in().await;
        let before = stored_hash(&state).await;

        let csrf = visitor.csrf("/account/password/update").await;
        let res = visitor
            .post(
                "/account/password/update",
                format!(
                    "csrf_token={csrf}&current_password=not-my-password&new_password=brand-new-secret&confirm_password=brand-new-secret"
                ),
            )
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            body_string(res)
                .await
                .contains("Current password is incorrect")
        );
        assert_eq!(stored_hash(&state).await, before);
    }

    #[tokio::test]
    async fn test_password_change_takes_effect() {
        let (mut visitor, state) = signed_in().await;
        let before_cookie = visitor.cookie.clone();

        let csrf = visitor.csrf("/account/password/update").await;
        let res = visitor
            .post(
                "/account/password/update",
                format!(
                    "csrf_token={csrf}&current_password={PASSWORD}&new_password=brand-new-secret&confirm_password=brand-new-secret"
                ),
            )
            .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/account/view"));
        assert_ne!(visitor.cookie, before_cookie);

        let page = body_string(visitor.get("/account/view").await).await;
        assert!(page.contains("Your password has been updated!"));

        let mut other = Visitor::new(&visitor_app(&state));
        let res = other.log_in(EMAIL, PASSWORD).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let res = other.log_in(EMAIL, "brand-new-secret").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_enhanced_password_failure_returns_fragment() {
        let (mut visitor, state) = signed_in().await;
        let before = stored_hash(&state).await;

        let csrf = visitor.csrf("/account/password/update").await;
        let res = visitor
            .post_enhanced(
                "/account/password/update",
                format!(
                    "csrf_token={csrf}&current_password=not-my-password&new_password=brand-new-secret&confirm_password=brand-new-secret"
                ),
            )
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.headers().get("HX-Redirect").is_none());

        let fragment = body_string(res).await;
        assert!(fragment.starts_with("<form"));
        assert!(!fragment.contains("<html"));
        assert!(fragment.contains("Current password is incorrect"));
        assert!(!fragment.contains("brand-new-secret"));
        assert_eq!(stored_hash(&state).await, before);
    }

    #[tokio::test]
    async fn test_enhanced_password_change_uses_hx_redirect() {
        let (mut visitor, state) = signed_in().await;
        let before = stored_hash(&state).await;

        let csrf = visitor.csrf("/account/password/update").await;
        let res = visitor
            .post_enhanced(
                "/account/password/update",
                format!(
                    "csrf_token={csrf}&current_password={PASSWORD}&new_password=brand-new-secret&confirm_password=brand-new-secret"
                ),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("HX-Redirect").unwrap(), "/account/view");
        assert_ne!(stored_hash(&state).await, before);
    }

    /// A second router over the same stores
    fn visitor_app(state: &TestState) -> axum::Router {
        use crate::presentation::router::{auth_router, session_layers};
        session_layers(auth_router(state.clone()), state.clone())
    }
}
