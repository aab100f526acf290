// Validator configuration

use fieldcheck_log::warn;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

/// How `maxLen`/`minLen` measure a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthMode {
    /// UTF-8 byte length; multi-byte characters count more than once
    #[default]
    Bytes,
    /// Number of Unicode scalar values
    Chars,
}

impl LengthMode {
    pub fn measure(&self, text: &str) -> usize {
        match self {
            LengthMode::Bytes => text.len(),
            LengthMode::Chars => text.chars().count(),
        }
    }
}

impl FromStr for LengthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bytes" | "byte" => Ok(LengthMode::Bytes),
            "chars" | "char" | "characters" => Ok(LengthMode::Chars),
            other => Err(format!("unknown length mode: {}", other)),
        }
    }
}

/// Settings shared by every validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidatorConfig {
    pub length_mode: LengthMode,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length_mode(mut self, mode: LengthMode) -> Self {
        self.length_mode = mode;
        self
    }

    /// Read `FIELDCHECK_LENGTH_MODE`. Unknown values fall back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = env::var("FIELDCHECK_LENGTH_MODE") {
            match raw.parse() {
                Ok(mode) => config.length_mode = mode,
                Err(e) => warn!("ignoring FIELDCHECK_LENGTH_MODE: {}", e),
            }
        }
        config
    }
}

static GLOBAL: Lazy<ValidatorConfig> = Lazy::new(ValidatorConfig::from_env);

/// Process-wide configuration, read from the environment on first use.
pub fn global() -> ValidatorConfig {
    *GLOBAL
}
