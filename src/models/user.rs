//! User and session models
//!
//! Passwords and e-mail addresses are never stored in clear: a user carries
//! an Argon2 PHC string and, optionally, the SHA-256 hash of an e-mail.
//! Sessions and password resets are stored under the hash of their token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A registered household member account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Login name, unique case-insensitively
    pub username: String,

    /// Argon2id PHC string (includes salt and parameters)
    pub password_hash: String,

    /// SHA-256 of the trimmed, lowercased e-mail address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user from an already-hashed password
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            email_hash: None,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    /// Whether an e-mail hash is on file
    pub fn has_email(&self) -> bool {
        self.email_hash.as_deref().is_some_and(|h| !h.is_empty())
    }

    /// Validate a username
    ///
    /// 3-32 characters of ASCII letters, digits, `_`, `-` or `.`.
    pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
        let len = username.chars().count();
        if !(3..=32).contains(&len) {
            return Err(UserValidationError::UsernameLength(len));
        }
        if let Some(c) = username
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(UserValidationError::UsernameCharacter(c));
        }
        Ok(())
    }
}

/// Validation errors for user registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    UsernameLength(usize),
    UsernameCharacter(char),
    PasswordTooShort { min: usize },
    PasswordMismatch,
}

impl std::fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernameLength(len) => {
                write!(f, "Username must be 3-32 characters (got {})", len)
            }
            Self::UsernameCharacter(c) => write!(f, "Username cannot contain '{}'", c),
            Self::PasswordTooShort { min } => {
                write!(f, "Password must be at least {} characters", min)
            }
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// A logged-in session, keyed by the hash of its token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Start a session that lives for `ttl`
    pub fn start(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// A password reset code, keyed by the hash of the code
///
/// Valid until it expires or is used, whichever comes first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordReset {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub used: bool,
}

impl PasswordReset {
    /// Issue a reset that lives for `ttl`
    pub fn issue(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            created_at: now,
            expires_at: now + ttl,
            used: false,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
    }
}
