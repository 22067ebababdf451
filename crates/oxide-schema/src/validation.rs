//! Value validators.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Trait for node validators.
///
/// Validators run on the converted native value of a node that is present;
/// missing values are handled by the node's required flag instead.
pub trait Validator: Send + Sync {
    /// Whether `value` passes.
    fn is_valid(&self, value: &Value) -> bool;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;

    /// Validates a value and returns the validator's message if invalid.
    fn validate(&self, value: &Value) -> Result<(), String> {
        if self.is_valid(value) {
            Ok(())
        } else {
            Err(self.message().to_string())
        }
    }
}

/// Validator bounding the length of strings (in characters) or sequences.
#[derive(Debug, Clone)]
pub struct LengthValidator {
    min: Option<usize>,
    max: Option<usize>,
    message: String,
}

impl LengthValidator {
    /// Creates a new LengthValidator with min and max bounds.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Length must be between {min} and {max}."),
            (Some(min), None) => format!("Shorter than minimum length {min}."),
            (None, Some(max)) => format!("Longer than maximum length {max}."),
            (None, None) => "Invalid length.".to_string(),
        };
        Self { min, max, message }
    }

    /// Creates a new LengthValidator with custom message.
    pub fn with_message(min: Option<usize>, max: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            min,
            max,
            message: message.into(),
        }
    }
}

impl Validator for LengthValidator {
    fn is_valid(&self, value: &Value) -> bool {
        let len = match value {
            Value::String(s) => s.chars().count(),
            Value::Array(items) => items.len(),
            _ => return true,
        };

        !(self.min.is_some_and(|min| len < min) || self.max.is_some_and(|max| len > max))
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for numeric range.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    message: String,
}

impl RangeValidator {
    /// Creates a new RangeValidator with min and max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Value must be between {min} and {max}."),
            (Some(min), None) => format!("Value must be at least {min}."),
            (None, Some(max)) => format!("Value must be at most {max}."),
            (None, None) => "Invalid value.".to_string(),
        };
        Self { min, max, message }
    }

    /// Creates a new RangeValidator with custom message.
    pub fn with_message(min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
        Self {
            min,
            max,
            message: message.into(),
        }
    }
}

impl Validator for RangeValidator {
    fn is_valid(&self, value: &Value) -> bool {
        value.as_f64().is_some_and(|num| {
            !(self.min.is_some_and(|min| num < min) || self.max.is_some_and(|max| num > max))
        })
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator using a custom regex pattern on string values.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn is_valid(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| self.pattern.is_match(s))
    }

    fn message(&self) -> &str {
        &self.message
    }
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Validator for email addresses.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Invalid email address".to_string(),
        }
    }

    /// Creates a new EmailValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn is_valid(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| EMAIL.is_match(s))
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator restricting a value to a fixed set of choices.
#[derive(Debug, Clone)]
pub struct OneOfValidator {
    choices: Vec<Value>,
    message: String,
}

impl OneOfValidator {
    /// Creates a new OneOfValidator.
    pub fn new<T: Into<Value>>(choices: impl IntoIterator<Item = T>) -> Self {
        let choices: Vec<Value> = choices.into_iter().map(Into::into).collect();
        let listed = choices
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            message: format!("Must be one of {listed}."),
            choices,
        }
    }
}

impl Validator for OneOfValidator {
    fn is_valid(&self, value: &Value) -> bool {
        self.choices.contains(value)
    }

    fn message(&self) -> &str {
        &self.message
    }
}
