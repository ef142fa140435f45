//! Input sanitisation for user-supplied values.

use crate::error::ReplanceError;

/// Byte limit for a single lead-form field.
pub const MAX_FIELD_LENGTH: usize = 200;
/// Upper bound on the poll interval accepted from the command line.
pub const MAX_POLL_SECS: u64 = 24 * 60 * 60;

/// Turn tabs and line breaks into spaces, strip the remaining ASCII control
/// characters, trim whitespace, and enforce a byte-length limit. `field` names
/// the input in error messages.
pub fn sanitize_text(field: &str, input: &str, max_len: usize) -> Result<String, ReplanceError> {
    if input.len() > max_len {
        return Err(ReplanceError::InvalidInput(format!(
            "{} exceeds maximum length of {} bytes",
            field, max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .filter(|c| !c.is_ascii_control())
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(ReplanceError::InvalidInput(format!("{} is required", field)));
    }
    Ok(sanitized)
}

/// Validate an email address: one `@`, non-empty local part, dotted domain,
/// no whitespace. Deliberately shallow; the backend does the real check.
pub fn validate_email(input: &str) -> Result<String, ReplanceError> {
    let email = sanitize_text("email", input, MAX_FIELD_LENGTH)?;
    let invalid = || ReplanceError::InvalidInput(format!("'{}' is not a valid email address", email));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(email)
}

/// Validate a poll interval in seconds: 1 through one day.
pub fn validate_poll_secs(secs: u64) -> Result<u64, ReplanceError> {
    if secs == 0 || secs > MAX_POLL_SECS {
        return Err(ReplanceError::InvalidInput(format!(
            "poll interval must be between 1 and {} seconds, got {}",
            MAX_POLL_SECS, secs
        )));
    }
    Ok(secs)
}
