use crate::error::{JsonError, JsonResult};
use crate::JToken;
use std::fmt;

/// Represents a JSON boolean
/// Mirrors the reference JBoolean class
#[derive(Debug, Clone, PartialEq)]
pub struct JBoolean {
    value: bool,
}

impl JBoolean {
    /// Creates a new JSON boolean
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    /// Creates a JSON boolean representing true
    pub fn true_value() -> Self {
        Self { value: true }
    }

    /// Creates a JSON boolean representing false
    pub fn false_value() -> Self {
        Self { value: false }
    }

    /// Gets the boolean value
    pub fn value(&self) -> bool {
        self.value
    }

    /// Sets the boolean value
    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    /// Converts the JBoolean to a JToken::Boolean
    pub fn to_jtoken(self) -> JToken {
        JToken::Boolean(self.value)
    }

    /// Creates a JBoolean from a JToken::Boolean
    pub fn from_jtoken(token: JToken) -> JsonResult<Self> {
        match token {
            JToken::Boolean(value) => Ok(Self { value }),
            _ => Err(JsonError::InvalidCast("Token is not a boolean".to_string())),
        }
    }
}

impl Default for JBoolean {
    fn default() -> Self {
        Self::new(false)
    }
}

impl From<bool> for JBoolean {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl From<JBoolean> for bool {
    fn from(jboolean: JBoolean) -> Self {
        jboolean.value
    }
}

impl fmt::Display for JBoolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
