//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- login tokens issued by `/auth/login` and checked per request.

pub mod jwt;
pub mod password;
