// Validation errors

use crate::Outcome;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

/// Broad category of a rule failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    EmptyValue,
    LengthOutOfBounds,
    InvalidFormat,
    OutOfRange,
    NotANumber,
    PatternMismatch,
    /// The rule's own pattern is broken, not the value
    InvalidPattern,
    FieldNotFound,
    /// Free-text message set directly on an outcome
    Custom,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyValue => "emptyValue",
            ErrorKind::LengthOutOfBounds => "lengthOutOfBounds",
            ErrorKind::InvalidFormat => "invalidFormat",
            ErrorKind::OutOfRange => "outOfRange",
            ErrorKind::NotANumber => "notANumber",
            ErrorKind::PatternMismatch => "patternMismatch",
            ErrorKind::InvalidPattern => "invalidPattern",
            ErrorKind::FieldNotFound => "fieldNotFound",
            ErrorKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded rule failure.
///
/// The `Display` output is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("It is a required input item")]
    Required,

    #[error("String too long. {value}({len}) > max({max})")]
    TooLong { value: String, len: usize, max: usize },

    #[error("String too short. {value}({len}) < min({min})")]
    TooShort { value: String, len: usize, min: usize },

    #[error("E-MAIL address is wrong")]
    InvalidEmail,

    #[error("parsing {value:?}: {source}")]
    NotANumber { value: String, source: ParseIntError },

    #[error("Exceeds the maximum value. {value} > {max}")]
    AboveMax { value: i64, max: i64 },

    #[error("Exceeds the min value. {value} < {min}")]
    BelowMin { value: i64, min: i64 },

    #[error("Not date")]
    NotDate,

    #[error("parsing date {value:?}: {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Not URL")]
    NotUrl,

    #[error("{pattern} no match")]
    PatternMismatch { pattern: String },

    #[error(transparent)]
    InvalidPattern(regex::Error),

    #[error("{field}: not found")]
    FieldNotFound { field: String },

    #[error("{0}")]
    Message(String),
}

impl RuleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuleError::Required => ErrorKind::EmptyValue,
            RuleError::TooLong { .. } | RuleError::TooShort { .. } => ErrorKind::LengthOutOfBounds,
            RuleError::InvalidEmail
            | RuleError::NotDate
            | RuleError::InvalidDate { .. }
            | RuleError::NotUrl => ErrorKind::InvalidFormat,
            RuleError::NotANumber { .. } => ErrorKind::NotANumber,
            RuleError::AboveMax { .. } | RuleError::BelowMin { .. } => ErrorKind::OutOfRange,
            RuleError::PatternMismatch { .. } => ErrorKind::PatternMismatch,
            RuleError::InvalidPattern(_) => ErrorKind::InvalidPattern,
            RuleError::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            RuleError::Message(_) => ErrorKind::Custom,
        }
    }
}

/// Failure to turn an input into a field mapping.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("input is null")]
    NullInput,

    #[error("failed to serialize input: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse input: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("expected an object at the root, found {found}")]
    NotAnObject { found: &'static str },
}

/// One field's recorded failure.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub error: RuleError,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// All failures of a multi-field validation run, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Collect the failed outcomes of `map`. Outcomes reset to `Unset` are
    /// skipped.
    pub fn from_map(map: &HashMap<String, Outcome>) -> Self {
        let mut errors: Vec<FieldError> = map
            .iter()
            .filter_map(|(field, outcome)| {
                outcome.error().map(|error| FieldError {
                    field: field.clone(),
                    error: error.clone(),
                })
            })
            .collect();
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Error recorded for `field`, if any
    pub fn get(&self, field: &str) -> Option<&RuleError> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.errors.iter().map(|e| {
                serde_json::json!({
                    "field": e.field,
                    "kind": e.error.kind(),
                    "message": e.error.to_string(),
                })
            }).collect::<Vec<_>>()
        })
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
