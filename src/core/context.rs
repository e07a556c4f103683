//! Per-call execution context
//!
//! The context is a plain key/value bag handed to every resolver of one
//! `execute` call. Authorization in this crate is a boolean flag check
//! against it: a gated field runs only when the flag is present and `true`.

use serde_json::Value;
use std::collections::HashMap;

use super::error::ExecutionError;

/// Key/value bag passed through a single execution
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    values: HashMap<String, Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Read a boolean flag; absent or non-boolean values count as `false`
    pub fn flag(&self, key: &str) -> bool {
        self.values
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Fail with an authorization error unless `flag` is set to `true`
    pub fn require_flag(&self, field_name: &str, flag: &str) -> Result<(), ExecutionError> {
        if self.flag(flag) {
            Ok(())
        } else {
            Err(ExecutionError::unauthorized(
                field_name,
                format!("context flag '{}' must be true", flag),
            ))
        }
    }
}

impl From<HashMap<String, Value>> for ExecutionContext {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}
