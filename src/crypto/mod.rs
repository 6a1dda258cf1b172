//! Cryptographic functions
//!
//! Argon2id password hashing and SHA-256 digests for session tokens and
//! e-mail addresses. Nothing secret is ever written to disk in clear.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password, Password};
pub use token::{generate_token, hash_email, hash_token};
