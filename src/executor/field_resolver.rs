//! Field resolution and value completion

use futures::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::document::{SelectedField, Selection, TYPENAME_FIELD, collect_fields};
use crate::config::ExecutorConfig;
use crate::core::{
    ExecutionContext, ExecutionError, FieldValue, GraphQLObject, PathSegment, ResponseError,
    RootObject,
};
use crate::schema::{Arguments, FieldDefinition, LIMIT_ARGUMENT, Schema, TypeRef, coerce_arguments};

/// What a single execution call resolves against
pub(crate) struct ExecutionScope<'a> {
    pub schema: &'a Schema,
    pub context: &'a ExecutionContext,
    pub config: &'a ExecutorConfig,
}

/// Result of one top-level field
pub(crate) struct FieldOutcome {
    pub key: String,
    /// `None` when the field itself failed
    pub value: Option<Value>,
    /// Errors of this field and of anything nested below it
    pub errors: Vec<ResponseError>,
}

/// Resolve a root field against the Query or Mutation root
pub(crate) async fn resolve_root_field(
    scope: &ExecutionScope<'_>,
    root_type: &str,
    key: &str,
    field: &Result<SelectedField, ExecutionError>,
) -> FieldOutcome {
    let root = RootObject::new(root_type);
    let path = vec![PathSegment::Key(key.to_string())];
    let mut errors = Vec::new();

    let resolved = match field {
        Ok(field) => resolve_field(scope, root_type, &root, field, &path, 1, &mut errors).await,
        Err(err) => Err(err.clone()),
    };
    let value = match resolved {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(field = %key, code = err.code(), error = %err, "root field failed");
            errors.push(err.into_response(path));
            None
        }
    };

    FieldOutcome {
        key: key.to_string(),
        value,
        errors,
    }
}

/// Resolve one selected field on `parent` and complete its value
///
/// Failures of the field itself are returned; failures of nested fields are
/// pushed onto `errors` and leave that nested field null.
fn resolve_field<'a>(
    scope: &'a ExecutionScope<'a>,
    type_name: &'a str,
    parent: &'a dyn GraphQLObject,
    field: &'a SelectedField,
    path: &'a [PathSegment],
    depth: usize,
    errors: &'a mut Vec<ResponseError>,
) -> BoxFuture<'a, Result<Value, ExecutionError>> {
    async move {
        if depth > scope.config.max_depth {
            return Err(ExecutionError::DepthLimit {
                max_depth: scope.config.max_depth,
            });
        }

        if field.name == TYPENAME_FIELD {
            return Ok(Value::String(type_name.to_string()));
        }

        let registry = scope.schema.registry();
        let definition = registry.lookup(type_name, &field.name)?;
        check_selection(definition, field)?;

        let args = coerce_arguments(definition, &field.arguments)?;
        let value = registry
            .resolve(type_name, &field.name, parent, &args, scope.context)
            .await?;
        let value = apply_limit(definition, &args, value);

        complete_value(scope, &definition.field_type, value, field, path, depth, errors).await
    }
    .boxed()
}

/// Object-typed fields need a sub-selection; scalar fields must not have one
fn check_selection(
    definition: &FieldDefinition,
    field: &SelectedField,
) -> Result<(), ExecutionError> {
    match (definition.field_type.object_name(), field.selection.is_empty()) {
        (Some(type_name), true) => Err(ExecutionError::InvalidSelection {
            field_name: field.name.clone(),
            message: format!(
                "field of type {} must have a selection of subfields",
                type_name
            ),
        }),
        (None, false) => Err(ExecutionError::InvalidSelection {
            field_name: field.name.clone(),
            message: format!(
                "field of type {} must not have a selection",
                definition.field_type
            ),
        }),
        _ => Ok(()),
    }
}

/// Truncate list results of fields declaring a `limit` argument
fn apply_limit(definition: &FieldDefinition, args: &Arguments, value: FieldValue) -> FieldValue {
    match (definition.argument(LIMIT_ARGUMENT), args.limit(), value) {
        (Some(_), Some(limit), FieldValue::List(mut items)) => {
            items.truncate(limit);
            FieldValue::List(items)
        }
        (_, _, value) => value,
    }
}

/// Complete a resolved value according to the declared type
fn complete_value<'a>(
    scope: &'a ExecutionScope<'a>,
    field_type: &'a TypeRef,
    value: FieldValue,
    field: &'a SelectedField,
    path: &'a [PathSegment],
    depth: usize,
    errors: &'a mut Vec<ResponseError>,
) -> BoxFuture<'a, Result<Value, ExecutionError>> {
    async move {
        if value.is_null() {
            return Ok(Value::Null);
        }

        match field_type {
            TypeRef::Scalar(kind) => {
                kind.serialize(&value)
                    .map_err(|message| ExecutionError::Serialization {
                        field_name: field.name.clone(),
                        message,
                    })
            }
            TypeRef::List(inner) => {
                let items = match value {
                    FieldValue::List(items) => items,
                    other => {
                        return Err(ExecutionError::Serialization {
                            field_name: field.name.clone(),
                            message: format!(
                                "expected a list, resolver returned {}",
                                other.kind_label()
                            ),
                        });
                    }
                };

                let mut completed = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let mut item_path = path.to_vec();
                    item_path.push(PathSegment::Index(index));

                    let item_value =
                        complete_value(scope, inner, item, field, &item_path, depth, &mut *errors)
                            .await;
                    match item_value {
                        Ok(value) => completed.push(value),
                        Err(err) => {
                            errors.push(err.into_response(item_path));
                            completed.push(Value::Null);
                        }
                    }
                }
                Ok(Value::Array(completed))
            }
            TypeRef::Object(type_name) => {
                let object = match value {
                    FieldValue::Object(object) => object,
                    other => {
                        return Err(ExecutionError::Serialization {
                            field_name: field.name.clone(),
                            message: format!(
                                "expected a {} object, resolver returned {}",
                                type_name,
                                other.kind_label()
                            ),
                        });
                    }
                };

                let completed =
                    complete_object(scope, type_name, object, &field.selection, path, depth, errors)
                        .await;
                Ok(Value::Object(completed))
            }
        }
    }
    .boxed()
}

/// Resolve every requested sub-field of one object
fn complete_object<'a>(
    scope: &'a ExecutionScope<'a>,
    type_name: &'a str,
    object: Arc<dyn GraphQLObject>,
    selection: &'a [Selection],
    path: &'a [PathSegment],
    depth: usize,
    errors: &'a mut Vec<ResponseError>,
) -> BoxFuture<'a, Map<String, Value>> {
    async move {
        let mut completed = Map::new();

        for (key, sub_field) in collect_fields(selection, type_name) {
            let mut field_path = path.to_vec();
            field_path.push(PathSegment::Key(key.clone()));

            let resolved = match sub_field {
                Ok(sub_field) => {
                    resolve_field(
                        scope,
                        type_name,
                        object.as_ref(),
                        &sub_field,
                        &field_path,
                        depth + 1,
                        &mut *errors,
                    )
                    .await
                }
                Err(err) => Err(err),
            };

            match resolved {
                Ok(value) => {
                    completed.insert(key, value);
                }
                Err(err) => {
                    tracing::debug!(field = %key, code = err.code(), error = %err, "field failed");
                    errors.push(err.into_response(field_path));
                    completed.insert(key, Value::Null);
                }
            }
        }

        completed
    }
    .boxed()
}
