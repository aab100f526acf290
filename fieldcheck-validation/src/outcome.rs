// Single-error holder for rule evaluation

use crate::RuleError;
use std::fmt;

/// Result of running rules against one value.
///
/// Starts `Unset` and only moves to `Failed` when a rule fails. A later
/// failure replaces the recorded error; a passing rule leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outcome {
    #[default]
    Unset,
    Failed(RuleError),
}

impl Outcome {
    pub fn new() -> Self {
        Self::Unset
    }

    pub fn failed(error: RuleError) -> Self {
        Self::Failed(error)
    }

    /// Record `error`, replacing whatever was held before.
    pub fn fail(&mut self, error: RuleError) -> &mut Self {
        *self = Self::Failed(error);
        self
    }

    /// Overwrite the held message with free text. An empty text resets the
    /// outcome to `Unset`.
    pub fn set_message(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        *self = if text.is_empty() {
            Self::Unset
        } else {
            Self::Failed(RuleError::Message(text))
        };
        self
    }

    /// The held message, or an empty string when nothing failed.
    pub fn error_text(&self) -> String {
        self.error().map(ToString::to_string).unwrap_or_default()
    }

    pub fn error(&self) -> Option<&RuleError> {
        match self {
            Self::Unset => None,
            Self::Failed(error) => Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::Failed(error) => write!(f, "{}", error),
        }
    }
}
