//! Submitted Forms
//!
//! Field names are the wire contract with the markup. Every form carries its
//! own [`Validator`]; checks run the same way whatever the response mode.

use kernel::validation::{Validator, rules};
use serde::Deserialize;

use crate::domain::value_object::email::Email;

const BLANK: &str = "This field cannot be blank";
const BAD_EMAIL: &str = "This field must be a valid email address";
const TOO_SHORT: &str = "This field must be at least 8 characters long";

/// Minimum password length, in characters
pub const PASSWORD_MIN_CHARS: usize = 8;

fn check_email(v: &mut Validator, email: &str) {
    v.check_field(rules::not_blank(email), "email", BLANK);
    v.check_field(Email::parse(email).is_some(), "email", BAD_EMAIL);
}

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub validator: Validator,
}

impl SignupForm {
    pub fn validate(&mut self) {
        let v = &mut self.validator;
        v.check_field(rules::not_blank(&self.name), "name", BLANK);
        check_email(v, &self.email);
        v.check_field(rules::not_blank(&self.password), "password", BLANK);
        v.check_field(
            rules::min_chars(&self.password, PASSWORD_MIN_CHARS),
            "password",
            TOO_SHORT,
        );
    }
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub validator: Validator,
}

impl LoginForm {
    pub fn validate(&mut self) {
        let v = &mut self.validator;
        check_email(v, &self.email);
        v.check_field(rules::not_blank(&self.password), "password", BLANK);
    }
}

// ============================================================================
// Password change
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PasswordUpdateForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    #[serde(skip)]
    pub validator: Validator,
}

impl PasswordUpdateForm {
    pub fn validate(&mut self) {
        let v = &mut self.validator;
        v.check_field(
            rules::not_blank(&self.current_password),
            "current_password",
            BLANK,
        );
        v.check_field(rules::not_blank(&self.new_password), "new_password", BLANK);
        v.check_field(
            rules::not_blank(&self.confirm_password),
            "confirm_password",
            BLANK,
        );
        v.check_field(
            rules::min_chars(&self.new_password, PASSWORD_MIN_CHARS),
            "new_password",
            TOO_SHORT,
        );
        v.check_field(
            self.new_password == self.confirm_password,
            "new_password",
            "Passwords do not match",
        );
    }
}

/// Logout carries nothing but the anti-forgery token
#[derive(Debug, Default, Deserialize)]
pub struct LogoutForm {}
