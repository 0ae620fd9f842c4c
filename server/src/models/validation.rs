//! Validation errors raised before a document is written.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid event id")]
    InvalidEventId,

    #[error("Referenced event not found")]
    EventNotFound,
}

/// Trim `value` and reject it when nothing is left.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 100 characters"
        );
        assert_eq!(
            ValidationError::EventNotFound.to_string(),
            "Referenced event not found"
        );
    }

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("title", "  Rust Meetup ").unwrap(), "Rust Meetup");
        assert_eq!(
            required("title", "   "),
            Err(ValidationError::Empty { field: "title" })
        );
    }
}
