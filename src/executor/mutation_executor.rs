//! Mutation execution

use super::document::{Selection, collect_fields};
use super::field_resolver::{ExecutionScope, FieldOutcome, resolve_root_field};
use crate::core::ExecutionError;

/// Resolve the top-level fields of a mutation, one after another
pub(crate) async fn execute_mutation(
    scope: &ExecutionScope<'_>,
    selection: &[Selection],
) -> Result<Vec<FieldOutcome>, ExecutionError> {
    let root_type =
        scope
            .schema
            .mutation_type()
            .ok_or_else(|| ExecutionError::InvalidOperation {
                message: "Schema does not define a Mutation root".to_string(),
            })?;

    let fields = collect_fields(selection, root_type);
    let mut outcomes = Vec::with_capacity(fields.len());

    for (key, field) in &fields {
        outcomes.push(resolve_root_field(scope, root_type, key, field).await);
    }

    Ok(outcomes)
}
