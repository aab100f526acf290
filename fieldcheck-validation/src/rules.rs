// Rule catalog

use crate::{LengthMode, RuleError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// Accepts 2019-01-02, 2018-1-2 and friends; `/` is normalized to `-` first.
static DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-([0-9]{2}|[0-9])-([0-9]{2}|[0-9])$").unwrap());

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[A-Za-z0-9_/:%#$\&?()\~.=+\-]+$").unwrap());

/// A named, parameterized check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Value must not be empty
    Require,
    MaxLen(usize),
    MinLen(usize),
    Email,
    /// Value must parse as a base-10 integer
    Number,
    /// Integer no greater than the bound (inclusive)
    Max(i64),
    /// Integer no less than the bound (inclusive)
    Min(i64),
    /// `YYYY-M-D` with `-` or `/` separators, calendar-checked
    Date,
    Url,
    /// Value must match the regular expression
    Match(String),
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Require => "require",
            Rule::MaxLen(_) => "maxLen",
            Rule::MinLen(_) => "minLen",
            Rule::Email => "email",
            Rule::Number => "number",
            Rule::Max(_) => "max",
            Rule::Min(_) => "min",
            Rule::Date => "date",
            Rule::Url => "url",
            Rule::Match(_) => "match",
        }
    }

    /// Prepare the rule for evaluation. Only `Match` can fail here, when its
    /// pattern does not compile.
    pub fn compile(&self, length_mode: LengthMode) -> Result<CompiledRule<'_>, RuleError> {
        let pattern = match self {
            Rule::Match(pattern) => Some(Regex::new(pattern).map_err(RuleError::InvalidPattern)?),
            _ => None,
        };

        Ok(CompiledRule {
            rule: self,
            pattern,
            length_mode,
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::MaxLen(n) | Rule::MinLen(n) => write!(f, "{}({})", self.name(), n),
            Rule::Max(n) | Rule::Min(n) => write!(f, "{}({})", self.name(), n),
            Rule::Match(pattern) => write!(f, "{}({})", self.name(), pattern),
            _ => write!(f, "{}()", self.name()),
        }
    }
}

/// A rule ready to be applied to individual rendered values.
#[derive(Debug)]
pub struct CompiledRule<'a> {
    rule: &'a Rule,
    pattern: Option<Regex>,
    length_mode: LengthMode,
}

impl CompiledRule<'_> {
    /// Check one rendered element.
    pub fn check(&self, value: &str) -> Result<(), RuleError> {
        match self.rule {
            Rule::Require => require(value),
            Rule::MaxLen(max) => max_len(value, *max, self.length_mode),
            Rule::MinLen(min) => min_len(value, *min, self.length_mode),
            Rule::Email => email(value),
            Rule::Number => parse_integer(value).map(|_| ()),
            Rule::Max(max) => max_value(value, *max),
            Rule::Min(min) => min_value(value, *min),
            Rule::Date => date(value),
            Rule::Url => url(value),
            Rule::Match(source) => match &self.pattern {
                Some(pattern) => matches(value, pattern, source),
                None => Ok(()),
            },
        }
    }
}

fn require(value: &str) -> Result<(), RuleError> {
    if value.is_empty() {
        Err(RuleError::Required)
    } else {
        Ok(())
    }
}

fn max_len(value: &str, max: usize, mode: LengthMode) -> Result<(), RuleError> {
    let len = mode.measure(value);
    if len > max {
        Err(RuleError::TooLong {
            value: value.to_string(),
            len,
            max,
        })
    } else {
        Ok(())
    }
}

fn min_len(value: &str, min: usize, mode: LengthMode) -> Result<(), RuleError> {
    let len = mode.measure(value);
    if len < min {
        Err(RuleError::TooShort {
            value: value.to_string(),
            len,
            min,
        })
    } else {
        Ok(())
    }
}

fn email(value: &str) -> Result<(), RuleError> {
    if value.is_empty() {
        return Ok(());
    }

    let parts: Vec<&str> = value.split('@').collect();
    match parts.as_slice() {
        [local, domain]
            if !local.is_empty() && !domain.is_empty() && local.is_ascii() && domain.is_ascii() =>
        {
            Ok(())
        }
        _ => Err(RuleError::InvalidEmail),
    }
}

fn parse_integer(value: &str) -> Result<i64, RuleError> {
    value
        .parse::<i64>()
        .map_err(|source| RuleError::NotANumber {
            value: value.to_string(),
            source,
        })
}

fn max_value(value: &str, max: i64) -> Result<(), RuleError> {
    let n = parse_integer(value)?;
    if n > max {
        Err(RuleError::AboveMax { value: n, max })
    } else {
        Ok(())
    }
}

fn min_value(value: &str, min: i64) -> Result<(), RuleError> {
    let n = parse_integer(value)?;
    if n < min {
        Err(RuleError::BelowMin { value: n, min })
    } else {
        Ok(())
    }
}

fn date(value: &str) -> Result<(), RuleError> {
    let normalized = value.replace('/', "-");
    if !DATE_REGEX.is_match(&normalized) {
        return Err(RuleError::NotDate);
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|source| RuleError::InvalidDate {
            value: normalized,
            source,
        })
}

fn url(value: &str) -> Result<(), RuleError> {
    if value.is_empty() || URL_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(RuleError::NotUrl)
    }
}

fn matches(value: &str, pattern: &Regex, source: &str) -> Result<(), RuleError> {
    if value.is_empty() || pattern.is_match(value) {
        Ok(())
    } else {
        Err(RuleError::PatternMismatch {
            pattern: source.to_string(),
        })
    }
}
