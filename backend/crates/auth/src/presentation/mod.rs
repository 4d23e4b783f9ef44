//! Presentation Layer
//!
//! HTTP handlers, forms, views, extractors, middleware and router.

pub mod extract;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use extract::CsrfForm;
pub use handlers::AuthAppState;
pub use middleware::{authenticate, require_authentication, session_layer};
pub use router::{auth_router, session_layers};
pub use views::TemplateData;
