//! Rule-based validation for loosely-typed input.
//!
//! Two layers share one rule catalog:
//!
//! - [`Validator`] checks a single value (a scalar or a list of scalars)
//!   and keeps at most one recorded failure.
//! - [`Validators`] converts any serializable object into a field mapping
//!   and keeps at most one failure per field name.
//!
//! Rule failures are never returned as `Err`. Run every check, then look at
//! the aggregate state.
//!
//! # Examples
//!
//! ## Single value
//!
//! ```
//! use fieldcheck_validation::{Validator, RuleError};
//!
//! let mut validator = Validator::new("2019/13/01");
//! validator.require();
//! validator.date();
//!
//! assert!(validator.has_errors());
//! assert!(matches!(validator.error(), Some(RuleError::InvalidDate { .. })));
//! ```
//!
//! ## Request body
//!
//! ```
//! use fieldcheck_validation::Validators;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Profile {
//!     email: String,
//!     homepage: String,
//!     age: u32,
//! }
//!
//! let profile = Profile {
//!     email: "john@example.com".to_string(),
//!     homepage: String::new(),
//!     age: 17,
//! };
//!
//! let mut validators = Validators::from_object(&profile).unwrap();
//! validators.require("email");
//! validators.email("email");
//! validators.url("homepage");
//! validators.min("age", 18);
//! validators.require("nickname");
//!
//! let errors = validators.into_result().unwrap_err();
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors.get("nickname").unwrap().to_string(), "nickname: not found");
//! ```
//!
//! ## Rules as values
//!
//! ```
//! use fieldcheck_validation::{Rule, Validator};
//!
//! let rules = [Rule::Require, Rule::Number, Rule::Min(1), Rule::Max(12)];
//! let mut validator = Validator::new(vec!["1", "6", "12"]);
//! for rule in &rules {
//!     validator.apply(rule);
//! }
//! assert!(!validator.has_errors());
//! ```

mod errors;
mod outcome;
mod rules;
mod validator;
mod validators;
mod value;

pub mod config;

pub use config::{LengthMode, ValidatorConfig};
pub use errors::*;
pub use outcome::*;
pub use rules::*;
pub use validator::*;
pub use validators::*;
pub use value::*;
