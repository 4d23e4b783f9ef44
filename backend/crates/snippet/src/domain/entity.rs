//! Snippet Entities

use chrono::{DateTime, Duration, Utc};
use kernel::id::SnippetId;

/// Lifetimes a snippet may be created with, in days
pub const PERMITTED_EXPIRY_DAYS: [i32; 3] = [1, 7, 365];

/// A stored snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Snippet {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Snippet to be inserted
#[derive(Debug, Clone)]
pub struct NewSnippet {
    pub title: String,
    pub content: String,
    pub expires_days: i32,
}

impl NewSnippet {
    /// Expiry instant for a snippet created at `created_at`
    pub fn expires_at(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + Duration::days(i64::from(self.expires_days))
    }
}
