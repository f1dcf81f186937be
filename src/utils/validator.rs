use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Minimum password length, in UTF-16 code units
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum username length, in UTF-16 code units
pub const MIN_USERNAME_LEN: usize = 3;

/// Reasons a (username, email, password) triple is rejected.
///
/// Rules are checked in declaration order and only the first failure is reported.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username, email, and password are required.")]
    MissingField,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,

    #[error("Username must be at least 3 characters long.")]
    UsernameTooShort,
}

/// Loose `local@domain.tld` shape. Unanchored: a match anywhere passes.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid email regex pattern"));

/// Validate email format
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Length as counted by JSON clients: UTF-16 code units
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Validate the fields shared by registration and update.
pub fn validate_fields(username: &str, email: &str, password: &str) -> Result<(), ValidationError> {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingField);
    }
    if !validate_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if utf16_len(password) < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if utf16_len(username) < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort);
    }
    Ok(())
}
