//! Session tokens and lookup hashes
//!
//! A session token is 32 random bytes, base64url encoded, handed to the
//! client once. Only its SHA-256 digest is stored, so a leaked session file
//! cannot be replayed. E-mail addresses are reduced to the same kind of
//! digest.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Number of random bytes in a session token
pub const TOKEN_BYTES: usize = 32;

/// Generate a new random session token
pub fn generate_token() -> Zeroizing<String> {
    let mut bytes = Zeroizing::new([0u8; TOKEN_BYTES]);
    OsRng.fill_bytes(&mut bytes[..]);
    Zeroizing::new(URL_SAFE_NO_PAD.encode(&bytes[..]))
}

/// Hex SHA-256 of a session token, the key sessions are stored under
pub fn hash_token(token: &str) -> String {
    sha256_hex(token.trim().as_bytes())
}

/// Hex SHA-256 of a normalized (trimmed, lowercased) e-mail address
pub fn hash_email(email: &str) -> String {
    sha256_hex(email.trim().to_lowercase().as_bytes())
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
