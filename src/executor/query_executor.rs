//! Query execution

use futures::future::join_all;

use super::document::{Selection, collect_fields};
use super::field_resolver::{ExecutionScope, FieldOutcome, resolve_root_field};

/// Resolve the top-level fields of a query
///
/// Fields are independent, so they are resolved concurrently when the
/// configuration allows it. Outcomes come back in request order either way.
pub(crate) async fn execute_query(
    scope: &ExecutionScope<'_>,
    selection: &[Selection],
) -> Vec<FieldOutcome> {
    let root_type = scope.schema.query_type();
    let fields = collect_fields(selection, root_type);

    if scope.config.concurrent_fields {
        join_all(
            fields
                .iter()
                .map(|(key, field)| resolve_root_field(scope, root_type, key, field)),
        )
        .await
    } else {
        let mut outcomes = Vec::with_capacity(fields.len());
        for (key, field) in &fields {
            outcomes.push(resolve_root_field(scope, root_type, key, field).await);
        }
        outcomes
    }
}
