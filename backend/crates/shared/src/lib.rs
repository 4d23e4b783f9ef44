//! Shared Kernel - Domain-crossing minimal core
//!
//! - [`error`]: the unified [`AppError`](error::app_error::AppError) and its
//!   status classification
//! - [`id`]: typed integer identities
//! - [`validation`]: the form [`Validator`](validation::Validator) and rule
//!   predicates

pub mod error {
    pub mod app_error;
    pub mod kind;
    #[cfg(feature = "axum")]
    pub mod response;
}
pub mod id;
pub mod validation;
