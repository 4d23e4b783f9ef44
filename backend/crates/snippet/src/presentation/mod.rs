//! Presentation Layer
//!
//! HTTP handlers, form, views and router.

pub mod forms;
pub mod handlers;
pub mod router;
pub mod views;

pub use handlers::SnippetAppState;
pub use router::snippet_router;
