//! Argument coercion

use indexmap::IndexMap;

use super::definition::FieldDefinition;
use crate::core::{ExecutionError, FieldValue, Id, InputValue};

/// Name of the argument that slices list results
pub const LIMIT_ARGUMENT: &str = "limit";

/// Coerced arguments of one field, in declaration order
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: IndexMap<String, FieldValue>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    /// Get a supplied (or defaulted) argument; explicit nulls read as absent
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_string)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_integer)
    }

    pub fn get_id(&self, name: &str) -> Option<&Id> {
        self.get(name).and_then(FieldValue::as_id)
    }

    /// The `limit` argument; coercion has already rejected negative values
    pub fn limit(&self) -> Option<usize> {
        self.get_int(LIMIT_ARGUMENT)
            .and_then(|limit| usize::try_from(limit).ok())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Coerce supplied argument literals against a field's declared arguments
pub fn coerce_arguments(
    field: &FieldDefinition,
    supplied: &IndexMap<String, InputValue>,
) -> Result<Arguments, ExecutionError> {
    if let Some(unknown) = supplied
        .keys()
        .find(|name| !field.arguments.contains_key(name.as_str()))
    {
        return Err(ExecutionError::argument_type(
            &field.wire_name,
            unknown,
            "unknown argument",
        ));
    }

    let mut arguments = Arguments::new();

    for (name, definition) in &field.arguments {
        let input = match supplied.get(name).or(definition.default_value.as_ref()) {
            Some(input) => input,
            None if definition.required => {
                return Err(ExecutionError::argument_type(
                    &field.wire_name,
                    name,
                    format!("required argument of type {}! was not provided", definition.kind),
                ));
            }
            None => continue,
        };

        let value = definition
            .kind
            .coerce_input(input)
            .map_err(|message| ExecutionError::argument_type(&field.wire_name, name, message))?;

        if value.is_null() && definition.required {
            return Err(ExecutionError::argument_type(
                &field.wire_name,
                name,
                "must not be null",
            ));
        }

        if name == LIMIT_ARGUMENT
            && let Some(limit) = value.as_integer()
            && limit < 0
        {
            return Err(ExecutionError::argument_type(
                &field.wire_name,
                name,
                format!("must not be negative, got {}", limit),
            ));
        }

        arguments.insert(name.clone(), value);
    }

    Ok(arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScalarKind;
    use crate::schema::{ArgumentDefinition, TypeRef};

    fn users_field() -> FieldDefinition {
        FieldDefinition::new("users", TypeRef::list(TypeRef::object("User")))
            .with_argument(ArgumentDefinition::new("limit", ScalarKind::Int))
    }

    fn supplied(pairs: &[(&str, InputValue)]) -> IndexMap<String, InputValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_absent_limit_is_absent() {
        let args = coerce_arguments(&users_field(), &IndexMap::new()).unwrap();
        assert_eq!(args.limit(), None);
        assert!(args.is_empty());
    }

    #[test]
    fn test_limit_is_coerced() {
        let args =
            coerce_arguments(&users_field(), &supplied(&[("limit", InputValue::Int(1))])).unwrap();
        assert_eq!(args.limit(), Some(1));
    }

    #[test]
    fn test_negative_limit_is_rejected() {
        let err = coerce_arguments(&users_field(), &supplied(&[("limit", InputValue::Int(-1))]))
            .unwrap_err();
        assert_eq!(err.code(), "ARGUMENT_TYPE_ERROR");
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_non_integer_limit_is_rejected() {
        let err = coerce_arguments(
            &users_field(),
            &supplied(&[("limit", InputValue::String("ten".to_string()))]),
        )
        .unwrap_err();
        assert_eq!(err.code(), "ARGUMENT_TYPE_ERROR");
    }

    #[test]
    fn test_unknown_argument_is_rejected() {
        let err = coerce_arguments(&users_field(), &supplied(&[("offset", InputValue::Int(1))]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument 'offset' on field 'users': unknown argument"
        );
    }

    #[test]
    fn test_required_argument_missing_or_null() {
        let field = FieldDefinition::new("createUser", TypeRef::object("User"))
            .with_argument(ArgumentDefinition::required("username", ScalarKind::String));

        let missing = coerce_arguments(&field, &IndexMap::new()).unwrap_err();
        assert!(missing.to_string().contains("was not provided"));

        let null = coerce_arguments(&field, &supplied(&[("username", InputValue::Null)]))
            .unwrap_err();
        assert!(null.to_string().contains("must not be null"));
    }

    #[test]
    fn test_default_value_applies() {
        let field = FieldDefinition::new("greeting", TypeRef::scalar(ScalarKind::String))
            .with_argument(
                ArgumentDefinition::new("name", ScalarKind::String)
                    .with_default(InputValue::String("world".to_string())),
            );

        let args = coerce_arguments(&field, &IndexMap::new()).unwrap();
        assert_eq!(args.get_str("name"), Some("world"));
    }
}
