//! Field value types, scalar kinds and scalar coercion

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::object::GraphQLObject;

/// A resolved field value
///
/// Resolvers produce these; the executor completes them into JSON according
/// to the field's declared type.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Id(Id),
    DateTime(DateTime<Utc>),
    List(Vec<FieldValue>),
    Object(Arc<dyn GraphQLObject>),
}

impl FieldValue {
    /// Wrap a value implementing [`GraphQLObject`]
    pub fn object<T: GraphQLObject + 'static>(object: T) -> Self {
        FieldValue::Object(Arc::new(object))
    }

    /// Build a list of objects
    pub fn objects<T, I>(objects: I) -> Self
    where
        T: GraphQLObject + 'static,
        I: IntoIterator<Item = T>,
    {
        FieldValue::List(objects.into_iter().map(FieldValue::object).collect())
    }

    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            FieldValue::Id(id) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&Id> {
        match self {
            FieldValue::Id(id) => Some(id),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub(crate) fn kind_label(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::String(_) => "String",
            FieldValue::Integer(_) => "Int",
            FieldValue::Float(_) => "Float",
            FieldValue::Boolean(_) => "Boolean",
            FieldValue::Id(_) => "ID",
            FieldValue::DateTime(_) => "DateTime",
            FieldValue::List(_) => "list",
            FieldValue::Object(_) => "object",
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Id> for FieldValue {
    fn from(value: Id) -> Self {
        FieldValue::Id(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// The GraphQL `ID` scalar, always serialized as a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Id(value.into())
    }

    /// A fresh random identifier
    pub fn generate() -> Self {
        Id(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id(value.to_string())
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id(value)
    }
}

impl From<Uuid> for Id {
    fn from(value: Uuid) -> Self {
        Id(value.to_string())
    }
}

/// Serialize a timestamp the one way every `DateTime` field is serialized
///
/// RFC 3339 in UTC with a `Z` suffix and only as many fractional digits as
/// the value carries, so parsing the text back yields the same instant.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a timestamp in the format produced by [`format_datetime`]
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Built-in scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int,
    Float,
    Boolean,
    Id,
    DateTime,
}

impl ScalarKind {
    /// GraphQL name of the scalar
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::String => "String",
            ScalarKind::Int => "Int",
            ScalarKind::Float => "Float",
            ScalarKind::Boolean => "Boolean",
            ScalarKind::Id => "ID",
            ScalarKind::DateTime => "DateTime",
        }
    }

    /// Whether the scalar is part of GraphQL itself rather than declared by the schema
    pub fn is_builtin(&self) -> bool {
        !matches!(self, ScalarKind::DateTime)
    }

    /// Coerce an argument literal to this scalar
    ///
    /// `null` passes through; the caller decides whether it is allowed.
    pub fn coerce_input(&self, input: &InputValue) -> Result<FieldValue, String> {
        let coerced = match (self, input) {
            (_, InputValue::Null) => FieldValue::Null,
            (ScalarKind::String, InputValue::String(s)) => FieldValue::String(s.clone()),
            (ScalarKind::Int, InputValue::Int(i)) => FieldValue::Integer(*i),
            (ScalarKind::Float, InputValue::Float(f)) => FieldValue::Float(*f),
            (ScalarKind::Float, InputValue::Int(i)) => FieldValue::Float(*i as f64),
            (ScalarKind::Boolean, InputValue::Boolean(b)) => FieldValue::Boolean(*b),
            (ScalarKind::Id, InputValue::String(s)) => FieldValue::Id(Id::new(s.clone())),
            (ScalarKind::Id, InputValue::Int(i)) => FieldValue::Id(Id::from(*i)),
            (ScalarKind::DateTime, InputValue::String(s)) => match parse_datetime(s) {
                Some(dt) => FieldValue::DateTime(dt),
                None => return Err(format!("'{}' is not an RFC 3339 timestamp", s)),
            },
            (kind, other) => {
                return Err(format!(
                    "expected {}, found {}",
                    kind.name(),
                    other.describe()
                ));
            }
        };
        Ok(coerced)
    }

    /// Serialize a resolved value as this scalar
    pub fn serialize(&self, value: &FieldValue) -> Result<Value, String> {
        let serialized = match (self, value) {
            (_, FieldValue::Null) => Value::Null,
            (ScalarKind::String, FieldValue::String(s)) => Value::String(s.clone()),
            (ScalarKind::String, FieldValue::Id(id)) => Value::String(id.to_string()),
            (ScalarKind::Int, FieldValue::Integer(i)) => Value::from(*i),
            (ScalarKind::Float, FieldValue::Integer(i)) => Value::from(*i as f64),
            (ScalarKind::Float, FieldValue::Float(f)) => Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| format!("{} is not a finite Float", f))?,
            (ScalarKind::Boolean, FieldValue::Boolean(b)) => Value::Bool(*b),
            (ScalarKind::Id, FieldValue::Id(id)) => Value::String(id.to_string()),
            (ScalarKind::Id, FieldValue::String(s)) => Value::String(s.clone()),
            (ScalarKind::Id, FieldValue::Integer(i)) => Value::String(i.to_string()),
            (ScalarKind::DateTime, FieldValue::DateTime(dt)) => {
                Value::String(format_datetime(dt))
            }
            (ScalarKind::DateTime, FieldValue::String(s)) => match parse_datetime(s) {
                Some(dt) => Value::String(format_datetime(&dt)),
                None => return Err(format!("'{}' is not an RFC 3339 timestamp", s)),
            },
            (kind, other) => {
                return Err(format!(
                    "expected {}, resolver returned {}",
                    kind.name(),
                    other.kind_label()
                ));
            }
        };
        Ok(serialized)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An argument or variable literal, with variables already substituted
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    List(Vec<InputValue>),
    Object(IndexMap<String, InputValue>),
}

impl InputValue {
    /// Convert a JSON variable value
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => InputValue::Null,
            Value::Bool(b) => InputValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => InputValue::Int(i),
                None => InputValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => InputValue::String(s.clone()),
            Value::Array(items) => InputValue::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => InputValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    fn describe(&self) -> String {
        match self {
            InputValue::Null => "null".to_string(),
            InputValue::Int(i) => format!("Int {}", i),
            InputValue::Float(f) => format!("Float {}", f),
            InputValue::String(s) => format!("String \"{}\"", s),
            InputValue::Boolean(b) => format!("Boolean {}", b),
            InputValue::Enum(e) => format!("enum value {}", e),
            InputValue::List(_) => "a list".to_string(),
            InputValue::Object(_) => "an input object".to_string(),
        }
    }
}
