//! Typed error handling for mockql
//!
//! Every failure the executor can hit is an [`ExecutionError`] value. None of
//! them escape [`execute`](crate::executor::execute): they are recovered at the
//! field (or document) boundary and reported as [`ResponseError`] entries in
//! the [`ExecutionResult`](crate::executor::ExecutionResult).
//!
//! # Error Categories
//!
//! - Schema construction: [`ExecutionError::DuplicateField`],
//!   [`ExecutionError::UnknownType`]
//! - Field lookup and selection: [`ExecutionError::UnknownField`],
//!   [`ExecutionError::InvalidSelection`], [`ExecutionError::DepthLimit`]
//! - Arguments: [`ExecutionError::ArgumentType`]
//! - Resolvers: [`ExecutionError::Authorization`], [`ExecutionError::Resolver`]
//! - Documents: [`ExecutionError::Parse`], [`ExecutionError::InvalidOperation`]
//!
//! # Example
//!
//! ```rust,ignore
//! use mockql::prelude::*;
//!
//! let result = execute(&schema, "{ nope }", Variables::new(), &ExecutionContext::new()).await;
//! match result.errors.first().map(|e| e.code()) {
//!     Some("UNKNOWN_FIELD") => println!("typo in the query"),
//!     Some(other) => eprintln!("failed: {}", other),
//!     None => println!("{}", result.to_json()),
//! }
//! ```

use serde::{Serialize, Serializer};
use thiserror::Error;

/// The main error type for query and mutation execution
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExecutionError {
    /// The requested field is not registered on the type
    #[error("Cannot query field '{field_name}' on type '{type_name}'")]
    UnknownField {
        type_name: String,
        field_name: String,
    },

    /// A field was registered twice on the same type
    #[error("Field '{field_name}' is already registered on type '{type_name}'")]
    DuplicateField {
        type_name: String,
        field_name: String,
    },

    /// A field refers to an object type the schema does not define
    #[error("Unknown type '{type_name}' referenced by field '{field_name}'")]
    UnknownType {
        type_name: String,
        field_name: String,
    },

    /// An argument failed coercion to its declared type
    #[error("Invalid argument '{argument}' on field '{field_name}': {message}")]
    ArgumentType {
        field_name: String,
        argument: String,
        message: String,
    },

    /// A context-gated field was denied
    #[error("Not authorized to access '{field_name}': {message}")]
    Authorization { field_name: String, message: String },

    /// The document could not be parsed
    #[error("GraphQL parse error: {message}")]
    Parse { message: String },

    /// The operation cannot be executed against this schema
    #[error("Invalid GraphQL operation: {message}")]
    InvalidOperation { message: String },

    /// The sub-selection does not fit the field's declared type
    #[error("Invalid selection on field '{field_name}': {message}")]
    InvalidSelection { field_name: String, message: String },

    /// A resolved value does not match the field's declared type
    #[error("Cannot serialize field '{field_name}': {message}")]
    Serialization { field_name: String, message: String },

    /// The selection is nested deeper than the configured maximum
    #[error("Query exceeds maximum depth of {max_depth}")]
    DepthLimit { max_depth: usize },

    /// Any other failure raised inside a resolver
    #[error("{message}")]
    Resolver { message: String },
}

impl ExecutionError {
    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            ExecutionError::UnknownField { .. } => "UNKNOWN_FIELD",
            ExecutionError::DuplicateField { .. } => "DUPLICATE_FIELD",
            ExecutionError::UnknownType { .. } => "UNKNOWN_TYPE",
            ExecutionError::ArgumentType { .. } => "ARGUMENT_TYPE_ERROR",
            ExecutionError::Authorization { .. } => "UNAUTHORIZED",
            ExecutionError::Parse { .. } => "PARSE_ERROR",
            ExecutionError::InvalidOperation { .. } => "INVALID_OPERATION",
            ExecutionError::InvalidSelection { .. } => "INVALID_SELECTION",
            ExecutionError::Serialization { .. } => "SERIALIZATION_ERROR",
            ExecutionError::DepthLimit { .. } => "DEPTH_LIMIT_EXCEEDED",
            ExecutionError::Resolver { .. } => "RESOLVER_ERROR",
        }
    }

    pub fn unknown_field(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        ExecutionError::UnknownField {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }

    pub fn argument_type(
        field_name: impl Into<String>,
        argument: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ExecutionError::ArgumentType {
            field_name: field_name.into(),
            argument: argument.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(field_name: impl Into<String>, message: impl Into<String>) -> Self {
        ExecutionError::Authorization {
            field_name: field_name.into(),
            message: message.into(),
        }
    }

    /// Convert into a response entry located at `path`
    pub fn into_response(self, path: Vec<PathSegment>) -> ResponseError {
        ResponseError {
            message: self.to_string(),
            path,
            extensions: ErrorExtensions { code: self.code() },
        }
    }
}

impl From<anyhow::Error> for ExecutionError {
    fn from(err: anyhow::Error) -> Self {
        // Resolvers that bubble a typed error through anyhow keep their kind
        match err.downcast::<ExecutionError>() {
            Ok(typed) => typed,
            Err(other) => ExecutionError::Resolver {
                message: other.to_string(),
            },
        }
    }
}

/// One segment of a response path: a response key or a list index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSegment::Key(key) => serializer.serialize_str(key),
            PathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Extra, machine-readable error data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorExtensions {
    pub code: &'static str,
}

/// An error entry as reported in an execution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseError {
    /// Human-readable error message
    pub message: String,
    /// Location of the failing field in the response
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
    pub extensions: ErrorExtensions,
}

impl ResponseError {
    pub fn code(&self) -> &'static str {
        self.extensions.code
    }
}
