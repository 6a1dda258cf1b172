//! Password hashing using Argon2id
//!
//! Passwords are stored as PHC strings (`$argon2id$v=19$...`), which carry
//! their own salt and cost parameters, so verification needs nothing else.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use zeroize::Zeroizing;

use crate::error::{BudgetError, BudgetResult};

/// A password held in memory that is wiped on drop
pub type Password = Zeroizing<String>;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> BudgetResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| BudgetError::Auth(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC string
///
/// A wrong password is `Ok(false)`; only a malformed hash is an error.
pub fn verify_password(password: &str, phc: &str) -> BudgetResult<bool> {
    let parsed = PasswordHash::new(phc)
        .map_err(|e| BudgetError::Auth(format!("Stored password hash is invalid: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same password", &b).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let err = verify_password("anything", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, BudgetError::Auth(_)));
    }
}
