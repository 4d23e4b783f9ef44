//! Rule predicates
//!
//! Pure, total functions. None of them panic, whatever the input.

use std::sync::LazyLock;

use regex::Regex;

/// Email shape accepted by the forms (the WHATWG `input[type=email]` pattern).
pub static EMAIL_RX: LazyLock<Regex> = LazyLock::new(|| {
    anchored(
        r"[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*",
    )
    .expect("EMAIL_RX is a valid pattern")
});

/// Compile `pattern` so that it only matches a whole string.
pub fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\A(?:{pattern})\z"))
}

/// False iff `value` is empty after trimming whitespace
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// At least `n` characters (Unicode scalar values, not bytes)
pub fn min_chars(value: &str, n: usize) -> bool {
    value.chars().count() >= n
}

/// At most `n` characters (Unicode scalar values, not bytes)
pub fn max_chars(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

/// Whole-string match.
///
/// `rx` should come from [`anchored`]. For an unanchored alternation the
/// leftmost-first match may stop short (`a|ab` on `"ab"` finds `"a"`), and the
/// value is then rejected.
pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.find(value)
        .is_some_and(|m| m.start() == 0 && m.end() == value.len())
}

/// `value` equals one of `permitted`
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}
