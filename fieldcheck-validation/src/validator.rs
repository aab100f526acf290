// Single-value validator

use crate::{Outcome, Rule, RuleError, Value, ValidatorConfig, config};
use fieldcheck_log::{debug, trace, warn};

/// Applies rules to one value, keeping at most one recorded failure.
///
/// A list value is checked element by element; evaluation of a rule stops
/// at the first failing element.
///
/// ```
/// use fieldcheck_validation::Validator;
///
/// let mut validator = Validator::new("alice@example.com");
/// validator.require();
/// validator.email();
/// validator.max_len(32);
/// assert!(!validator.has_errors());
///
/// let mut validator = Validator::new(vec!["1", "x", "3"]);
/// assert!(validator.number().is_failed());
///
/// let mut validator = Validator::new("not-an-address");
/// validator.email().set_message("Please enter a valid e-mail");
/// assert_eq!(validator.error_text(), "Please enter a valid e-mail");
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    value: Value,
    outcome: Outcome,
    config: ValidatorConfig,
}

impl Validator {
    /// Wrap a value using the process-wide configuration.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_config(value, config::global())
    }

    pub fn with_config(value: impl Into<Value>, config: ValidatorConfig) -> Self {
        Self {
            value: value.into(),
            outcome: Outcome::new(),
            config,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }

    /// Run `check` over each rendered element, recording the first failure.
    /// Returns `true` when a failure was recorded.
    fn confirm<F>(&mut self, check: F) -> bool
    where
        F: Fn(&str) -> Result<(), RuleError>,
    {
        let result = match &self.value {
            Value::List(items) => items.iter().try_for_each(|item| check(&item.to_string())),
            Value::Scalar(scalar) => check(&scalar.to_string()),
        };

        match result {
            Ok(()) => false,
            Err(error) => {
                self.outcome.fail(error);
                true
            }
        }
    }

    /// Apply one rule. A failure replaces any previously recorded error; a
    /// pass leaves the outcome as it was.
    ///
    /// The returned outcome is the validator's own, so a caller can replace
    /// the message with `set_message`.
    pub fn apply(&mut self, rule: &Rule) -> &mut Outcome {
        trace!("applying {}", rule);

        match rule.compile(self.config.length_mode) {
            Ok(compiled) => {
                if self.confirm(|value| compiled.check(value)) {
                    debug!("{} failed: {}", rule, self.outcome);
                }
            }
            Err(error) => {
                warn!("{} has an invalid pattern: {}", rule, error);
                self.outcome.fail(error);
            }
        }

        &mut self.outcome
    }

    pub fn require(&mut self) -> &mut Outcome {
        self.apply(&Rule::Require)
    }

    pub fn max_len(&mut self, max: usize) -> &mut Outcome {
        self.apply(&Rule::MaxLen(max))
    }

    pub fn min_len(&mut self, min: usize) -> &mut Outcome {
        self.apply(&Rule::MinLen(min))
    }

    pub fn email(&mut self) -> &mut Outcome {
        self.apply(&Rule::Email)
    }

    pub fn number(&mut self) -> &mut Outcome {
        self.apply(&Rule::Number)
    }

    pub fn max(&mut self, max: i64) -> &mut Outcome {
        self.apply(&Rule::Max(max))
    }

    pub fn min(&mut self, min: i64) -> &mut Outcome {
        self.apply(&Rule::Min(min))
    }

    pub fn date(&mut self) -> &mut Outcome {
        self.apply(&Rule::Date)
    }

    pub fn url(&mut self) -> &mut Outcome {
        self.apply(&Rule::Url)
    }

    /// Match against a regular expression. A pattern that does not compile
    /// is recorded as the failure and the value is not examined.
    pub fn matches(&mut self, pattern: impl Into<String>) -> &mut Outcome {
        self.apply(&Rule::Match(pattern.into()))
    }

    pub fn has_errors(&self) -> bool {
        self.outcome.is_failed()
    }

    pub fn error(&self) -> Option<&RuleError> {
        self.outcome.error()
    }

    pub fn error_text(&self) -> String {
        self.outcome.error_text()
    }
}
