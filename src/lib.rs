// Fieldcheck - rule-based validation for loosely-typed input
//
// This library re-exports the validation engine and the logging crate it
// reports through.

// Re-export the engine
pub use fieldcheck_validation::*;

// Logging controls (FIELDCHECK_DEBUG, FIELDCHECK_LOG_LEVEL, ...)
pub use fieldcheck_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ConversionError, ErrorKind, FieldErrors, LengthMode, Outcome, Rule, RuleError, Scalar,
        ValidatorConfig, Validator, Validators, Value,
    };
}
