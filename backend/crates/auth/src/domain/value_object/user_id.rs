//! User identity
//!
//! The integer key assigned by the user store. Shared with other crates through
//! the kernel so snippets and sessions can refer to users without depending on
//! this crate's entities.

pub use kernel::id::UserId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_roundtrip_through_json() {
        let id = UserId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_user_id_validity() {
        assert!(UserId::new(1).is_valid());
        assert!(!UserId::new(0).is_valid());
    }
}
