//! Form Validation
//!
//! [`Validator`] accumulates field-level and non-field failures while a handler
//! runs its declarative checks. Every form type composes one by value and
//! templates read the collected messages back out of it.
//!
//! ## Examples
//! ```rust
//! use kernel::validation::{Validator, rules};
//!
//! let title = "   ";
//! let mut v = Validator::default();
//! v.check_field(rules::not_blank(title), "title", "This field cannot be blank");
//! v.check_field(rules::max_chars(title, 100), "title", "This field cannot be more than 100 characters");
//!
//! assert!(!v.valid());
//! assert_eq!(v.field_errors("title"), ["This field cannot be blank"]);
//! ```

pub mod rules;

use std::collections::BTreeMap;

pub use rules::EMAIL_RX;

/// Accumulated validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    field_errors: BTreeMap<String, Vec<String>>,
    non_field_errors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff nothing has been recorded
    pub fn valid(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    /// Record `message` under `field` iff `ok` is false
    pub fn check_field(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.add_field_error(field, message);
        }
    }

    pub fn add_field_error(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field_error(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    /// Messages for one field, in the order they were recorded
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First message for a field (what the templates show)
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors(field).first().map(String::as_str)
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        self.field_errors.contains_key(field)
    }

    pub fn non_field_errors(&self) -> &[String] {
        &self.non_field_errors
    }

    /// Fields with at least one error
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.field_errors.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_valid() {
        let v = Validator::new();
        assert!(v.valid());
        assert!(v.field_errors("title").is_empty());
        assert!(v.field_error("title").is_none());
        assert!(v.non_field_errors().is_empty());
    }

    #[test]
    fn test_check_field_records_only_failures() {
        let mut v = Validator::new();
        v.check_field(true, "title", "never recorded");
        assert!(v.valid());

        v.check_field(false, "title", "This field cannot be blank");
        assert!(!v.valid());
        assert!(v.has_field_error("title"));
        assert_eq!(v.field_error("title"), Some("This field cannot be blank"));
    }

    #[test]
    fn test_messages_keep_order_within_field() {
        let mut v = Validator::new();
        v.check_field(false, "new_password", "first");
        v.check_field(false, "email", "other field");
        v.check_field(false, "new_password", "second");

        assert_eq!(v.field_errors("new_password"), ["first", "second"]);
        assert_eq!(v.fields().collect::<Vec<_>>(), ["email", "new_password"]);
    }

    #[test]
    fn test_non_field_error_alone_invalidates() {
        let mut v = Validator::new();
        v.add_non_field_error("Email or password is incorrect");
        assert!(!v.valid());
        assert_eq!(v.fields().count(), 0);
        assert_eq!(v.non_field_errors(), ["Email or password is incorrect"]);
    }

    #[test]
    fn test_add_field_error_is_unconditional() {
        let mut v = Validator::new();
        v.add_field_error("email", "Email address is already in use");
        assert_eq!(v.field_errors("email").len(), 1);
    }
}
