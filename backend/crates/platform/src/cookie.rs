//! Cookie Management Infrastructure
//!
//! Reading the session cookie from a request and building `Set-Cookie` values.
//! Only the session layer talks to this module; handlers never see cookies.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<u64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// `Set-Cookie` value carrying `value`
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut attrs = vec![format!("{}={}", self.name, value)];

        if self.http_only {
            attrs.push("HttpOnly".to_string());
        }
        if self.secure {
            attrs.push("Secure".to_string());
        }
        attrs.push(format!("SameSite={}", self.same_site.as_str()));
        attrs.push(format!("Path={}", self.path));
        if let Some(max_age) = self.max_age_secs {
            attrs.push(format!("Max-Age={max_age}"));
        }

        attrs.join("; ")
    }
}

/// Extract a cookie value from headers
///
/// Looks through every `Cookie` header, browsers may split them.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Create a Set-Cookie header value
///
/// Returns `None` when the value contains bytes that cannot appear in a header.
pub fn set_cookie_header(config: &CookieConfig, value: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&config.build_set_cookie(value)).ok()
}
