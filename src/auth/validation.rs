//! Input validation for QuickChat user registration.
//!
//! This module provides validation functions for usernames, passwords,
//! and cell phone numbers.

use thiserror::Error;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 5;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validation errors.
///
/// The display text of each variant is shown to the user verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Username lacks an underscore or is too long.
    #[error("Username is not correctly formatted, please ensure that your username contains an underscore and is no more than five characters in length.")]
    UsernameFormat,

    /// Password is too short or not complex enough.
    #[error("Password is not correctly formatted; please ensure that the password contains at least eight characters, a capital letter, a number, and a special character.")]
    PasswordComplexity,

    /// Cell phone number is not in an accepted format.
    #[error("Cell phone number incorrectly formatted or does not contain international code.")]
    CellPhoneFormat,
}

/// Validate a username.
///
/// Requirements:
/// - Contains an underscore
/// - Length: at most 5 characters
///
/// # Examples
///
/// ```
/// use quickchat::auth::validation::validate_username;
///
/// assert!(validate_username("kyl_1").is_ok());
/// assert!(validate_username("kyle!!!!!!!").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.contains('_') || username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameFormat);
    }
    Ok(())
}

/// Validate password complexity.
///
/// Requirements:
/// - Length: at least 8 characters
/// - At least one upper-case letter
/// - At least one digit
/// - At least one character that is neither a letter nor a digit
///
/// # Examples
///
/// ```
/// use quickchat::auth::validation::validate_password_complexity;
///
/// assert!(validate_password_complexity("Ch&&sec@ke99!").is_ok());
/// assert!(validate_password_complexity("password").is_err());
/// ```
pub fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordComplexity);
    }

    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if !(has_upper && has_digit && has_special) {
        return Err(ValidationError::PasswordComplexity);
    }
    Ok(())
}

/// Validate a cell phone number.
///
/// The number must be exactly `+27` or `027` followed by 9 digits. No
/// separators are tolerated.
///
/// # Examples
///
/// ```
/// use quickchat::auth::validation::validate_cell_phone;
///
/// assert!(validate_cell_phone("+27838968976").is_ok());
/// assert!(validate_cell_phone("027838968976").is_ok());
/// assert!(validate_cell_phone("08966553").is_err());
/// ```
pub fn validate_cell_phone(cell_phone: &str) -> Result<(), ValidationError> {
    let local = cell_phone
        .strip_prefix("+27")
        .or_else(|| cell_phone.strip_prefix("027"));

    match local {
        Some(digits) if digits.len() == 9 && digits.bytes().all(|b| b.is_ascii_digit()) => Ok(()),
        _ => Err(ValidationError::CellPhoneFormat),
    }
}

/// Validate all registration fields.
///
/// Unlike the individual checks, every failure is collected so the user sees
/// them all at once. An empty vector means the fields are valid.
pub fn validate_registration(
    username: &str,
    password: &str,
    cell_phone: &str,
) -> Vec<ValidationError> {
    [
        validate_username(username),
        validate_password_complexity(password),
        validate_cell_phone(cell_phone),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}
