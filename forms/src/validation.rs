//! Field validation for the agency forms.
//!
//! The `validate_*` functions check one raw value and describe what is wrong
//! with it. [`validate`] runs every declared check of a schema against a
//! [`FormState`] and produces a complete [`ErrorMap`], keeping the first
//! failing check per field.
//!
//! # Rules
//!
//! - Required text is trimmed before the emptiness check
//! - Emails follow `\S+@\S+\.\S+`
//! - Numbers are integers no smaller than a per-field bound
//! - Passwords are counted in characters, untrimmed

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::schema::{Check, FormSchema};
use crate::state::{ErrorMap, FormState};
use crate::value::{Attachment, FieldValue};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Why a single value failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input is empty when a value is required.
    Empty,
    /// Input is shorter than minimum required length.
    TooShort {
        /// Minimum required length.
        min: usize,
        /// Actual length of input.
        actual: usize,
    },
    /// Input does not match expected format.
    InvalidFormat {
        /// Description of expected format.
        expected: String,
    },
    /// Input is not an integer.
    NotANumber,
    /// Input is an integer below the allowed minimum.
    BelowMinimum {
        min: i64,
        actual: i64,
    },
    /// Consent box left unticked.
    Unchecked,
    /// Input differs from the field it must repeat.
    Mismatch {
        other: &'static str,
    },
    /// No file attached where one is mandatory.
    NoAttachments,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "Input cannot be empty"),
            ValidationError::TooShort { min, actual } => {
                write!(
                    f,
                    "Input too short: minimum {} characters, got {}",
                    min, actual
                )
            }
            ValidationError::InvalidFormat { expected } => {
                write!(f, "Invalid format: expected {}", expected)
            }
            ValidationError::NotANumber => write!(f, "Input is not a whole number"),
            ValidationError::BelowMinimum { min, actual } => {
                write!(f, "Value too small: minimum {}, got {}", min, actual)
            }
            ValidationError::Unchecked => write!(f, "Box must be checked"),
            ValidationError::Mismatch { other } => {
                write!(f, "Input does not match field `{}`", other)
            }
            ValidationError::NoAttachments => write!(f, "At least one file is required"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates that a text, select, date or time value is present.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] if the trimmed input is empty.
///
/// # Examples
///
/// ```
/// use forms::validation::validate_required;
///
/// assert!(validate_required("Lyon").is_ok());
/// assert!(validate_required("   ").is_err());
/// ```
pub fn validate_required(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(())
}

/// Validates an email address.
///
/// The check is deliberately loose: some non-space characters, an `@`, some
/// non-space characters, a `.` and some more non-space characters.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] for blank input and
/// [`ValidationError::InvalidFormat`] when the pattern does not match.
///
/// # Examples
///
/// ```
/// use forms::validation::validate_email;
///
/// assert!(validate_email("a@b.co").is_ok());
/// assert!(validate_email("abc").is_err());
/// assert!(validate_email("a@b").is_err());
/// ```
pub fn validate_email(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    if !EMAIL_PATTERN.is_match(input) {
        return Err(ValidationError::InvalidFormat {
            expected: "valid email address (name@domain.tld)".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole number typed into a text input and returns it.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] for blank input,
/// [`ValidationError::NotANumber`] when the trimmed input is not an integer and
/// [`ValidationError::BelowMinimum`] when it is smaller than `min`.
///
/// # Examples
///
/// ```
/// use forms::validation::validate_number;
///
/// assert_eq!(validate_number("85", 1), Ok(85));
/// assert!(validate_number("0", 1).is_err());
/// assert!(validate_number("999", 1000).is_err());
/// ```
pub fn validate_number(input: &str, min: i64) -> Result<i64, ValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let value = trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber)?;

    if value < min {
        return Err(ValidationError::BelowMinimum { min, actual: value });
    }

    Ok(value)
}

/// Validates that a string has a minimum number of characters.
///
/// The input is not trimmed: surrounding spaces count, as they do in a password.
///
/// # Errors
///
/// Returns [`ValidationError::TooShort`] when the input has fewer than
/// `min_len` characters.
pub fn validate_min_length(input: &str, min_len: usize) -> Result<(), ValidationError> {
    let actual = input.chars().count();

    if actual < min_len {
        return Err(ValidationError::TooShort {
            min: min_len,
            actual,
        });
    }

    Ok(())
}

/// Validates that a consent box is ticked.
///
/// # Errors
///
/// Returns [`ValidationError::Unchecked`] when `checked` is false.
pub fn validate_checked(checked: bool) -> Result<(), ValidationError> {
    if checked {
        Ok(())
    } else {
        Err(ValidationError::Unchecked)
    }
}

/// Validates that `input` repeats the value of the field `other` exactly.
///
/// # Errors
///
/// Returns [`ValidationError::Mismatch`] when the two values differ.
pub fn validate_same(
    input: &str,
    other_value: &str,
    other: &'static str,
) -> Result<(), ValidationError> {
    if input == other_value {
        Ok(())
    } else {
        Err(ValidationError::Mismatch { other })
    }
}

/// Validates that at least one file is attached.
///
/// # Errors
///
/// Returns [`ValidationError::NoAttachments`] for an empty selection.
pub fn validate_attachments(files: &[Attachment]) -> Result<(), ValidationError> {
    if files.is_empty() {
        return Err(ValidationError::NoAttachments);
    }
    Ok(())
}

fn run_check(check: &Check, value: &FieldValue, state: &FormState) -> Result<(), ValidationError> {
    let text = value.as_text().unwrap_or("");
    match check {
        Check::Required => match value {
            FieldValue::Files(files) => validate_attachments(files),
            FieldValue::Bool(flag) => validate_checked(*flag),
            FieldValue::Text(text) => validate_required(text),
        },
        Check::Email => validate_email(text),
        Check::MinValue(min) => validate_number(text, *min).map(|_| ()),
        Check::MinLength(min) => validate_min_length(text, *min),
        Check::Checked => validate_checked(value.as_bool().unwrap_or(false)),
        Check::SameAs(other) => validate_same(text, state.text(other), *other),
        Check::NonEmptyFiles => validate_attachments(value.as_files().unwrap_or(&[])),
    }
}

/// Runs every check declared by `schema` against `state`.
///
/// The result is a complete map: it replaces any previous one rather than
/// being merged into it. An empty map means the form may be submitted.
#[must_use]
pub fn validate(schema: &FormSchema, state: &FormState) -> ErrorMap {
    let mut errors = ErrorMap::default();

    for spec in schema.fields() {
        let Some(value) = state.get(spec.name) else {
            continue;
        };

        for field_check in &spec.checks {
            if let Err(err) = run_check(&field_check.check, value, state) {
                debug!(
                    form = schema.name,
                    field = spec.name,
                    error = %err,
                    "Field failed validation"
                );
                errors.set(spec.name, field_check.message);
                break;
            }
        }
    }

    errors
}
