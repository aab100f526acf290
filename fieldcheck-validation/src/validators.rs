// Multi-field validator

use crate::{
    ConversionError, FieldErrors, Outcome, Rule, RuleError, Validator, ValidatorConfig, Value,
    config,
};
use fieldcheck_log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// Applies rules to named fields of an object and keeps one outcome per
/// field.
///
/// Rules never stop the run: issue every check, then inspect
/// [`has_errors`](Self::has_errors) once. Each rule method hands back the
/// field's stored outcome when the rule failed, so a custom message set on
/// it replaces the recorded error. A passing rule hands back a detached
/// outcome and records nothing.
///
/// ```
/// use fieldcheck_validation::Validators;
/// use serde_json::json;
///
/// let body = json!({ "username": "", "age": "17", "tags": ["a", "b"] });
/// let mut validators = Validators::from_object(&body).unwrap();
///
/// validators.require("username");
/// validators.min("age", 18);
/// validators.max_len("tags", 8);
///
/// assert!(validators.has_errors());
/// assert_eq!(validators.error_list().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Validators {
    fields: HashMap<String, Value>,
    errors: HashMap<String, Outcome>,
    // Returned for passing rules; never reported
    detached: Outcome,
    config: ValidatorConfig,
}

impl Validators {
    /// Convert any serializable object into a field mapping.
    ///
    /// Fails when the input is null or does not serialize to an object.
    pub fn from_object<T: Serialize + ?Sized>(input: &T) -> Result<Self, ConversionError> {
        Self::from_object_with_config(input, config::global())
    }

    pub fn from_object_with_config<T: Serialize + ?Sized>(
        input: &T,
        config: ValidatorConfig,
    ) -> Result<Self, ConversionError> {
        let value = serde_json::to_value(input).map_err(ConversionError::Serialize)?;
        Self::from_json_value_with_config(value, config)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConversionError> {
        Self::from_json_value_with_config(value, config::global())
    }

    pub fn from_json_value_with_config(
        value: serde_json::Value,
        config: ValidatorConfig,
    ) -> Result<Self, ConversionError> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => return Err(ConversionError::NullInput),
            other => {
                return Err(ConversionError::NotAnObject {
                    found: json_kind(&other),
                });
            }
        };

        Ok(Self {
            fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            errors: HashMap::new(),
            detached: Outcome::new(),
            config,
        })
    }

    /// Parse a raw JSON body.
    pub fn from_json_str(text: &str) -> Result<Self, ConversionError> {
        let value = serde_json::from_str(text).map_err(ConversionError::Parse)?;
        Self::from_json_value(value)
    }

    /// Apply `rule` to the field `name`.
    ///
    /// A failing rule overwrites the field's recorded error, a passing one
    /// leaves it in place. A name missing from the input always records a
    /// not-found error.
    pub fn check(&mut self, name: &str, rule: &Rule) -> &mut Outcome {
        let Some(value) = self.fields.get(name) else {
            debug!("field {} not found for {}", name, rule);
            let slot = self.errors.entry(name.to_string()).or_default();
            return slot.fail(RuleError::FieldNotFound {
                field: name.to_string(),
            });
        };

        let mut validator = Validator::with_config(value.clone(), self.config);
        validator.apply(rule);

        match validator.into_outcome() {
            Outcome::Failed(error) => self.errors.entry(name.to_string()).or_default().fail(error),
            Outcome::Unset => {
                self.detached = Outcome::new();
                &mut self.detached
            }
        }
    }

    pub fn require(&mut self, name: &str) -> &mut Outcome {
        self.check(name, &Rule::Require)
    }

    pub fn max_len(&mut self, name: &str, max: usize) -> &mut Outcome {
        self.check(name, &Rule::MaxLen(max))
    }

    pub fn min_len(&mut self, name: &str, min: usize) -> &mut Outcome {
        self.check(name, &Rule::MinLen(min))
    }

    pub fn email(&mut self, name: &str) -> &mut Outcome {
        self.check(name, &Rule::Email)
    }

    pub fn number(&mut self, name: &str) -> &mut Outcome {
        self.check(name, &Rule::Number)
    }

    pub fn max(&mut self, name: &str, max: i64) -> &mut Outcome {
        self.check(name, &Rule::Max(max))
    }

    pub fn min(&mut self, name: &str, min: i64) -> &mut Outcome {
        self.check(name, &Rule::Min(min))
    }

    pub fn date(&mut self, name: &str) -> &mut Outcome {
        self.check(name, &Rule::Date)
    }

    pub fn url(&mut self, name: &str) -> &mut Outcome {
        self.check(name, &Rule::Url)
    }

    pub fn matches(&mut self, name: &str, pattern: impl Into<String>) -> &mut Outcome {
        self.check(name, &Rule::Match(pattern.into()))
    }

    /// True when any field holds a failure. A stored outcome cleared with
    /// `set_message("")` no longer counts.
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(Outcome::is_failed)
    }

    /// Recorded errors in no particular order.
    pub fn error_list(&self) -> Vec<&RuleError> {
        self.errors.values().filter_map(Outcome::error).collect()
    }

    pub fn errors(&self) -> &HashMap<String, Outcome> {
        &self.errors
    }

    pub fn error_for(&self, name: &str) -> Option<&RuleError> {
        self.errors.get(name).and_then(Outcome::error)
    }

    /// `Err` with every recorded error, sorted by field name.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        let errors = FieldErrors::from_map(&self.errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        FieldErrors::from_map(&self.errors).to_json()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct SignUp {
        username: String,
        min: String,
        max: String,
    }

    fn sign_up() -> SignUp {
        SignUp {
            username: String::new(),
            min: "4".to_string(),
            max: "10".to_string(),
        }
    }

    #[test]
    fn test_one_error_per_failing_field() {
        let mut validators = Validators::from_object(&sign_up()).unwrap();
        validators.require("username");
        validators.min("min", 5);
        validators.max("max", 9);

        assert!(validators.has_errors());
        assert_eq!(validators.errors().len(), 3);
        assert_eq!(validators.error_for("username"), Some(&RuleError::Required));
        assert_eq!(
            validators.error_for("min"),
            Some(&RuleError::BelowMin { value: 4, min: 5 })
        );
        assert_eq!(
            validators.error_for("max"),
            Some(&RuleError::AboveMax { value: 10, max: 9 })
        );
    }

    #[test]
    fn test_passing_fields_are_not_recorded() {
        let mut validators = Validators::from_object(&json!({"name": "x", "age": 30})).unwrap();
        assert!(!validators.require("name").is_failed());
        assert!(!validators.min("age", 18).is_failed());
        assert!(!validators.has_errors());
        assert!(validators.into_result().is_ok());
    }

    #[test]
    fn test_missing_field_is_recorded() {
        let mut validators = Validators::from_object(&json!({"present": "yes"})).unwrap();
        let outcome = validators.require("missing");
        assert_eq!(outcome.error_text(), "missing: not found");

        validators.email("missing");
        assert_eq!(validators.errors().len(), 1);
        assert_eq!(
            validators.error_for("missing").map(RuleError::kind),
            Some(ErrorKind::FieldNotFound)
        );
    }

    #[test]
    fn test_pass_keeps_earlier_failure() {
        let mut validators = Validators::from_object(&json!({"code": "abc"})).unwrap();
        validators.number("code");
        validators.max_len("code", 10);
        assert_eq!(
            validators.error_for("code").map(RuleError::kind),
            Some(ErrorKind::NotANumber)
        );

        validators.min_len("code", 5);
        assert_eq!(
            validators.error_for("code").map(RuleError::kind),
            Some(ErrorKind::LengthOutOfBounds)
        );
    }

    #[test]
    fn test_message_set_after_failure_replaces_error() {
        let mut validators = Validators::from_object(&json!({"mail": "@x.net"})).unwrap();
        validators.email("mail").set_message("EMAIL ERROR");
        validators.require("missing").set_message("NG");

        assert_eq!(
            validators.error_for("mail"),
            Some(&RuleError::Message("EMAIL ERROR".to_string()))
        );
        assert_eq!(
            validators.error_for("missing").map(ToString::to_string),
            Some("NG".to_string())
        );
        assert_eq!(validators.error_list().len(), 2);
    }

    #[test]
    fn test_message_set_after_pass_records_nothing() {
        let mut validators = Validators::from_object(&json!({"mail": "a@x.net"})).unwrap();
        let outcome = validators.email("mail").set_message("EMAIL ERROR");
        assert!(outcome.is_failed());

        assert!(!validators.has_errors());
        assert_eq!(validators.error_for("mail"), None);
        assert!(validators.into_result().is_ok());
    }

    #[test]
    fn test_cleared_message_drops_field_from_report() {
        let mut validators = Validators::from_object(&json!({"age": "abc"})).unwrap();
        validators.number("age").set_message("");

        assert!(!validators.has_errors());
        assert!(validators.error_list().is_empty());
        assert!(validators.into_result().is_ok());
    }

    #[test]
    fn test_whole_float_passes_integer_rules() {
        let mut validators = Validators::from_json_str(r#"{"n": 3.0}"#).unwrap();
        validators.number("n");
        validators.min("n", 3);
        validators.max("n", 3);
        assert!(!validators.has_errors());
    }

    #[test]
    fn test_list_field() {
        let mut validators =
            Validators::from_object(&json!({"emails": ["a@b.c", "bad", "x@y@z"]})).unwrap();
        validators.email("emails");
        assert_eq!(validators.error_for("emails"), Some(&RuleError::InvalidEmail));
    }

    #[test]
    fn test_conversion_failures() {
        assert!(matches!(
            Validators::from_object(&serde_json::Value::Null),
            Err(ConversionError::NullInput)
        ));
        assert!(matches!(
            Validators::from_object(&Option::<SignUp>::None),
            Err(ConversionError::NullInput)
        ));
        assert!(matches!(
            Validators::from_object(&42),
            Err(ConversionError::NotAnObject { found: "number" })
        ));
        assert!(matches!(
            Validators::from_object(&vec!["a"]),
            Err(ConversionError::NotAnObject { found: "array" })
        ));
        assert!(matches!(
            Validators::from_json_str("{not json"),
            Err(ConversionError::Parse(_))
        ));
        assert!(Validators::from_object(&json!({})).is_ok());
    }

    #[test]
    fn test_map_with_non_string_keys_fails_to_serialize() {
        let mut input = HashMap::new();
        input.insert(vec![1u8], "value");
        assert!(matches!(
            Validators::from_object(&input),
            Err(ConversionError::Serialize(_))
        ));
    }

    #[test]
    fn test_into_result_and_json() {
        let mut validators =
            Validators::from_json_str(r#"{"site": "ftp://x", "born": "2019-13-01"}"#).unwrap();
        validators.url("site");
        validators.date("born");

        let json = validators.to_json();
        assert_eq!(json["errors"][0]["field"], "born");
        assert_eq!(json["errors"][1]["message"], "Not URL");

        let errors = validators.into_result().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("site"), Some(&RuleError::NotUrl));
    }
}
