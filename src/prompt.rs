//! Asking the user for a password.

use std::io;
use zeroize::Zeroizing;

/// Set this to avoid the interactive prompt (e.g. in scripts).
pub const PASSWORD_ENV_VAR: &str = "SECRETLI_PASSWORD";

/// Read the password from [`PASSWORD_ENV_VAR`], falling back to prompting on
/// the terminal.
///
/// Leading and trailing whitespace is removed. An empty password is treated
/// as no password at all.
pub fn read_password() -> Result<Option<Zeroizing<String>>, PromptError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR) {
        log::debug!("Using the password from ${}", PASSWORD_ENV_VAR);
        return Ok(normalize(Zeroizing::new(password)));
    }

    let password = rpassword::prompt_password("Enter Password: ")
        .map_err(PromptError)?;

    Ok(normalize(Zeroizing::new(password)))
}

fn normalize(raw: Zeroizing<String>) -> Option<Zeroizing<String>> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(Zeroizing::new(trimmed.to_string()))
    }
}

/// Unable to read a password from the terminal.
#[derive(Debug, thiserror::Error)]
#[error("Unable to read the password from the terminal")]
pub struct PromptError(#[source] io::Error);
