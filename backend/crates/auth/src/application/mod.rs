//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod check_session;
pub mod config;
pub mod credentials;
pub mod session;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use change_password::ChangePasswordUseCase;
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use credentials::SharedHasher;
pub use session::Session;
pub use sign_in::SignInUseCase;
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
