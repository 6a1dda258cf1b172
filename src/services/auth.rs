//! Authentication service
//!
//! Registration, login, logout, password changes and password resets.
//! Sessions live in a [`SessionStore`] passed in by the caller, keyed by the
//! SHA-256 hash of the token; the raw token only ever exists on the client
//! side. Reset codes are stored the same way.

use std::path::Path;

use chrono::Utc;
use zeroize::Zeroizing;

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::config::{BudgetPaths, Settings};
use crate::crypto::{generate_token, hash_email, hash_password, hash_token, verify_password};
use crate::error::{BudgetError, BudgetResult};
use crate::models::user::UserValidationError;
use crate::models::{PasswordReset, Session, User};
use crate::storage::file_io::{restrict_permissions, write_atomic};
use crate::storage::{initialize_user_storage, SessionStore, Storage};

/// Service for user accounts and sessions
pub struct AuthService<'a, S: SessionStore> {
    storage: &'a Storage,
    sessions: &'a S,
    settings: &'a Settings,
}

impl<'a, S: SessionStore> AuthService<'a, S> {
    /// Create a new auth service
    pub fn new(storage: &'a Storage, sessions: &'a S, settings: &'a Settings) -> Self {
        Self {
            storage,
            sessions,
            settings,
        }
    }

    /// Register a new user and set up their data directory
    pub fn register(&self, username: &str, password: &str, email: Option<&str>) -> BudgetResult<User> {
        let username = username.trim();
        User::validate_username(username).map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.check_password(password)?;

        if self.storage.users.get_by_username(username)?.is_some() {
            return Err(BudgetError::Duplicate {
                entity_type: "User",
                identifier: username.to_string(),
            });
        }

        let mut user = User::new(username, hash_password(password)?);
        user.email_hash = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(hash_email);

        // The data directory must exist before the user becomes visible
        let user_storage = self.storage.user_storage(user.id)?;
        initialize_user_storage(&user_storage)?;

        self.storage.users.insert(user.clone())?;
        if let Err(e) = self.storage.users.save() {
            self.storage.users.remove(user.id)?;
            return Err(e);
        }

        user_storage.log(AuditEntry::event(
            Operation::Create,
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            "registered",
        ))?;

        log::info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Check credentials and open a session
    ///
    /// Returns the user and the raw session token. Unknown user and wrong
    /// password fail with the same message.
    pub fn login(&self, username: &str, password: &str) -> BudgetResult<(User, Zeroizing<String>)> {
        self.sessions.purge_expired(Utc::now())?;

        let invalid = || BudgetError::Auth("Invalid username or password".into());
        let mut user = self
            .storage
            .users
            .get_by_username(username)?
            .ok_or_else(invalid)?;
        if !verify_password(password, &user.password_hash)? {
            log::warn!("Failed login for {}", user.username);
            return Err(invalid());
        }

        let token = generate_token();
        let session = Session::start(user.id, self.settings.session_ttl());
        self.sessions.set(&hash_token(&token), session.clone())?;

        user.last_login = Some(session.created_at);
        self.storage.users.update(user.clone())?;
        self.storage.users.save()?;

        self.storage.user_storage(user.id)?.log(AuditEntry::event(
            Operation::Create,
            EntityType::Session,
            user.id.to_string(),
            Some(user.username.clone()),
            format!("logged in, expires {}", session.expires_at.format("%Y-%m-%d")),
        ))?;

        Ok((user, token))
    }

    /// The user a token belongs to
    ///
    /// An expired session is removed and treated as absent.
    pub fn authenticate(&self, token: &str) -> BudgetResult<User> {
        let token_hash = hash_token(token);
        let session = self
            .sessions
            .get(&token_hash)?
            .ok_or_else(BudgetError::not_logged_in)?;

        if session.is_expired() {
            self.sessions.delete(&token_hash)?;
            return Err(BudgetError::Auth(
                "Session expired. Run 'budget login' again.".into(),
            ));
        }

        self.storage
            .users
            .get(session.user_id)?
            .ok_or_else(BudgetError::not_logged_in)
    }

    /// End the session a token belongs to, returning whether one existed
    pub fn logout(&self, token: &str) -> BudgetResult<bool> {
        self.sessions.delete(&hash_token(token))
    }

    /// Change the password of the token's user
    ///
    /// Every other session of the user is revoked; the calling session stays
    /// valid. Returns the number of revoked sessions.
    pub fn change_password(&self, token: &str, current: &str, new_password: &str) -> BudgetResult<usize> {
        let mut user = self.authenticate(token)?;
        if !verify_password(current, &user.password_hash)? {
            return Err(BudgetError::Auth("Current password is incorrect".into()));
        }
        self.check_password(new_password)?;

        user.password_hash = hash_password(new_password)?;
        self.storage.users.update(user.clone())?;
        self.storage.users.save()?;

        let revoked = self
            .sessions
            .delete_for_user(user.id, Some(&hash_token(token)))?;

        self.storage.user_storage(user.id)?.log(AuditEntry::event(
            Operation::Update,
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            format!("password changed, {} other session(s) revoked", revoked),
        ))?;

        Ok(revoked)
    }

    /// Set or clear the e-mail address of the token's user
    ///
    /// Only the hash is kept. Without an address on file the user cannot
    /// request a password reset.
    pub fn update_email(&self, token: &str, email: Option<&str>) -> BudgetResult<User> {
        let mut user = self.authenticate(token)?;
        user.email_hash = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(hash_email);

        self.storage.users.update(user.clone())?;
        self.storage.users.save()?;

        self.storage.user_storage(user.id)?.log(AuditEntry::event(
            Operation::Update,
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            if user.has_email() { "e-mail set" } else { "e-mail removed" },
        ))?;

        Ok(user)
    }

    /// Issue a reset code for the user with this e-mail address
    ///
    /// Returns `None` when no user has the address on file. Any earlier code
    /// of the user stops working.
    pub fn request_password_reset(
        &self,
        email: &str,
    ) -> BudgetResult<Option<(User, Zeroizing<String>)>> {
        let Some(user) = self.storage.users.get_by_email_hash(&hash_email(email))? else {
            log::info!("Password reset requested for an unknown address");
            return Ok(None);
        };

        let code = generate_token();
        let reset = PasswordReset::issue(user.id, self.settings.reset_ttl());
        let expires_at = reset.expires_at;
        self.storage
            .open_password_resets()?
            .issue(&hash_token(&code), reset)?;

        self.storage.user_storage(user.id)?.log(AuditEntry::event(
            Operation::Create,
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            format!("password reset requested, expires {}", expires_at.format("%Y-%m-%d %H:%M")),
        ))?;

        Ok(Some((user, code)))
    }

    /// Set a new password with a reset code
    ///
    /// The code works once. Every session of the user is revoked.
    pub fn reset_password(&self, code: &str, new_password: &str) -> BudgetResult<User> {
        let resets = self.storage.open_password_resets()?;
        let code_hash = hash_token(code);
        let reset = resets
            .get_valid(&code_hash, Utc::now())?
            .ok_or_else(|| BudgetError::Auth("Invalid or expired reset code".into()))?;
        self.check_password(new_password)?;

        let mut user = self
            .storage
            .users
            .get(reset.user_id)?
            .ok_or_else(|| BudgetError::Auth("Invalid or expired reset code".into()))?;
        user.password_hash = hash_password(new_password)?;
        self.storage.users.update(user.clone())?;
        self.storage.users.save()?;
        resets.mark_used(&code_hash)?;

        let revoked = self.sessions.delete_for_user(user.id, None)?;

        self.storage.user_storage(user.id)?.log(AuditEntry::event(
            Operation::Update,
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            format!("password reset, {} session(s) revoked", revoked),
        ))?;

        Ok(user)
    }

    fn check_password(&self, password: &str) -> BudgetResult<()> {
        let min = self.settings.min_password_length;
        if password.chars().count() < min {
            return Err(BudgetError::Validation(
                UserValidationError::PasswordTooShort { min }.to_string(),
            ));
        }
        Ok(())
    }
}

/// Store the raw token of the current login on the client side
pub fn save_client_token(paths: &BudgetPaths, token: &str) -> BudgetResult<()> {
    let path = paths.current_session_file();
    write_atomic(&path, token.as_bytes())?;
    restrict_permissions(&path)
}

/// Read the current login's token, if any
pub fn load_client_token(paths: &BudgetPaths) -> BudgetResult<Option<Zeroizing<String>>> {
    read_token(&paths.current_session_file())
}

/// Forget the current login's token
pub fn clear_client_token(paths: &BudgetPaths) -> BudgetResult<()> {
    let path = paths.current_session_file();
    if path.exists() {
        std::fs::remove_file(&path)
            .map_err(|e| BudgetError::Io(format!("Failed to remove session file: {}", e)))?;
    }
    Ok(())
}

fn read_token(path: &Path) -> BudgetResult<Option<Zeroizing<String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = Zeroizing::new(
        std::fs::read_to_string(path)
            .map_err(|e| BudgetError::Io(format!("Failed to read session file: {}", e)))?,
    );
    let token = contents.trim();
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(Zeroizing::new(token.to_string())))
}
