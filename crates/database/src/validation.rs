//! Input validation for customer-facing fields.
//!
//! Limits mirror the column widths declared in [`crate::schema`].

use thiserror::Error;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Invalid email format.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
    /// Invalid color value.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    /// Value too long for its column.
    #[error("{field} is too long ({actual} chars, max {max})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Empty value where one is required.
    #[error("{0} cannot be empty")]
    Empty(&'static str),
}

/// Width of `VARCHAR(255)` columns (names, emails, passwords).
pub const MAX_TEXT_LENGTH: usize = 255;

/// Width of `VARCHAR(50)` columns (colors, status, file type).
pub const MAX_SHORT_LENGTH: usize = 50;

/// Require a non-blank value that fits its column.
pub fn validate_required(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    validate_length(field, value, max)
}

/// Reject values wider than their column.
pub fn validate_length(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Validate an email address.
///
/// Checks for a single `@` with a non-empty local part and a dotted domain
/// that neither starts nor ends with a dot and has no empty labels.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    validate_required("email", email, MAX_TEXT_LENGTH)?;

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail("missing @".to_string()));
    };

    if domain.contains('@') {
        return Err(ValidationError::InvalidEmail("more than one @".to_string()));
    }
    if local.is_empty() {
        return Err(ValidationError::InvalidEmail("missing local part".to_string()));
    }
    if !domain.contains('.') {
        return Err(ValidationError::InvalidEmail("domain needs a dot".to_string()));
    }
    if domain.split('.').any(str::is_empty) {
        return Err(ValidationError::InvalidEmail("empty domain label".to_string()));
    }

    Ok(())
}

/// Validate a `#rgb` or `#rrggbb` branding color.
pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| ValidationError::InvalidColor(format!("{color} must start with #")))?;

    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidColor(format!(
            "{color} is not a hex color"
        )));
    }

    Ok(())
}
