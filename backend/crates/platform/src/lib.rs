//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, SHA-256, constant-time compare)
//! - Password hashing (Argon2id behind the [`password::PasswordHasher`] seam)
//! - Cookie management
//! - Form decoding (`application/x-www-form-urlencoded` into typed forms)
//! - Response-mode selection (full page vs. htmx fragment)
//! - askama template responses

pub mod cookie;
pub mod crypto;
pub mod form;
pub mod password;
pub mod response;
pub mod template;
