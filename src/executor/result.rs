//! Execution results

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::core::{ExecutionError, ResponseError};

/// Outcome of one `execute` call
///
/// `data` holds every field that resolved, in request order; `errors` holds
/// every failure. Errors take precedence when the result is reported: a
/// result with errors serializes as `{ "errors": [...] }` only. Callers that
/// accept partial results can still read `data` directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    pub data: Map<String, Value>,
    pub errors: Vec<ResponseError>,
}

impl ExecutionResult {
    pub(crate) fn from_error(err: ExecutionError) -> Self {
        Self {
            data: Map::new(),
            errors: vec![err.into_response(Vec::new())],
        }
    }

    /// True when no error was recorded
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Value of a top-level response key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The reported form: the data mapping, or the error list when non-empty
    pub fn to_json(&self) -> Value {
        if self.errors.is_empty() {
            Value::Object(self.data.clone())
        } else {
            json!({ "errors": self.errors })
        }
    }

    /// Split into data or errors, with errors taking precedence
    pub fn into_result(self) -> Result<Map<String, Value>, Vec<ResponseError>> {
        if self.errors.is_empty() {
            Ok(self.data)
        } else {
            Err(self.errors)
        }
    }
}

impl Serialize for ExecutionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_result_serializes_as_data() {
        let mut result = ExecutionResult::default();
        result.data.insert("hello".to_string(), json!("world"));

        assert!(result.is_ok());
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"hello": "world"}));
    }

    #[test]
    fn test_errors_take_precedence() {
        let mut result = ExecutionResult::from_error(ExecutionError::InvalidOperation {
            message: "Subscriptions are not supported".to_string(),
        });
        result.data.insert("hello".to_string(), json!("world"));

        let reported = result.to_json();
        assert!(reported.get("hello").is_none());
        assert_eq!(
            reported["errors"][0]["message"],
            "Invalid GraphQL operation: Subscriptions are not supported"
        );
        assert_eq!(result.get("hello"), Some(&json!("world")));
        assert!(result.into_result().is_err());
    }
}
