//! User registration and login for QuickChat.
//!
//! A single local account is registered per session and must log in before
//! the messaging core is used.

use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::validation::{validate_registration, ValidationError};
use crate::Result;

/// Shown when registration succeeds.
pub const REGISTRATION_SUCCESS: &str = "User registered successfully.";

const USERNAME_CAPTURED: &str = "Username successfully captured.";
const PASSWORD_CAPTURED: &str = "Password successfully captured.";
const CELL_PHONE_ADDED: &str = "Cell phone number successfully added.";

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    errors: Vec<ValidationError>,
}

impl RegistrationOutcome {
    /// Whether the account was registered.
    pub fn is_registered(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field errors, empty on success.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Text shown to the user.
    ///
    /// On success this is [`REGISTRATION_SUCCESS`]. Otherwise one line per
    /// field, reporting either the capture or the problem.
    pub fn message(&self) -> String {
        if self.is_registered() {
            return REGISTRATION_SUCCESS.to_string();
        }

        let line = |error: ValidationError, ok: &str| {
            if self.errors.contains(&error) {
                format!("{error}\n")
            } else {
                format!("{ok}\n")
            }
        };

        let mut message = line(ValidationError::UsernameFormat, USERNAME_CAPTURED);
        message.push_str(&line(ValidationError::PasswordComplexity, PASSWORD_CAPTURED));
        message.push_str(&line(ValidationError::CellPhoneFormat, CELL_PHONE_ADDED));
        message
    }
}

#[derive(Debug, Clone)]
struct StoredCredential {
    username: String,
    password_hash: String,
    cell_phone: String,
}

/// Single-account credential holder.
#[derive(Debug, Default)]
pub struct Login {
    credential: Option<StoredCredential>,
}

impl Login {
    /// Create a holder with no registered account.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the account.
    ///
    /// On validation failure nothing is stored and the outcome lists every
    /// problem. A successful registration replaces any earlier account.
    /// Fails with [`QuickChatError::Auth`](crate::QuickChatError::Auth) if
    /// the password cannot be hashed.
    pub fn register_user(
        &mut self,
        username: &str,
        password: &str,
        cell_phone: &str,
    ) -> Result<RegistrationOutcome> {
        let errors = validate_registration(username, password, cell_phone);
        if !errors.is_empty() {
            warn!(username, failures = errors.len(), "registration rejected");
            return Ok(RegistrationOutcome { errors });
        }

        let password_hash = hash_password(password)?;
        self.credential = Some(StoredCredential {
            username: username.to_string(),
            password_hash,
            cell_phone: cell_phone.to_string(),
        });
        info!(username, "user registered");
        Ok(RegistrationOutcome { errors })
    }

    /// Check a username and password against the registered account.
    pub fn login_user(&self, username: &str, password: &str) -> bool {
        let Some(credential) = &self.credential else {
            warn!(username, "login attempted before registration");
            return false;
        };

        let ok = credential.username == username
            && verify_password(password, &credential.password_hash).is_ok();
        if ok {
            info!(username, "login succeeded");
        } else {
            warn!(username, "login failed");
        }
        ok
    }

    /// Registered username, if any.
    pub fn username(&self) -> Option<&str> {
        self.credential.as_ref().map(|c| c.username.as_str())
    }

    /// Registered cell phone number, if any.
    pub fn cell_phone(&self) -> Option<&str> {
        self.credential.as_ref().map(|c| c.cell_phone.as_str())
    }
}

/// Text shown after a login attempt.
pub fn login_status_message(logged_in: bool, first_name: &str, last_name: &str) -> String {
    if logged_in {
        format!("Welcome {first_name}, {last_name} it is great to see you again.")
    } else {
        "Username or password incorrect, please try again.".to_string()
    }
}
