use crate::error::{AppError, Result};

/// Message shown when either credential field is empty.
pub const MSG_MISSING_FIELDS: &str = "Please enter both username and password.";

/// Entry guard for the login form: both fields must be non-empty after
/// trimming. No credential check happens when this fails.
///
/// # Arguments
///
/// * `username` - The submitted username.
/// * `password` - The submitted password.
///
/// # Returns
///
/// A `Result<()>` indicating whether the submission may proceed.
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(AppError::Validation(MSG_MISSING_FIELDS.to_string()));
    }

    Ok(())
}
