//! Record validation rules.

/// Error type for validation failures.
///
/// The `Display` text is what the API returns in its `{message}` body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("`{value}` is not a valid value for {field} (expected one of: {allowed})")]
    InvalidEnum {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("invalid record: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Wraps a serde decoding failure.
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Checks that a required string field is non-empty after trimming.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Checks that an enumerated field holds one of its fixed values.
///
/// `is_valid` and `allowed` come from the enum's generated helpers.
pub fn check_enum(
    field: &'static str,
    value: &str,
    is_valid: bool,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    if is_valid {
        return Ok(());
    }
    Err(ValidationError::InvalidEnum {
        field,
        value: value.to_owned(),
        allowed: allowed.join(", "),
    })
}
