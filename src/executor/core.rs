//! Core executor orchestration

use serde_json::Map;
use std::sync::Arc;

use super::document::{self, OperationKind, Variables};
use super::field_resolver::{ExecutionScope, FieldOutcome};
use super::mutation_executor;
use super::query_executor;
use super::result::ExecutionResult;
use crate::config::ExecutorConfig;
use crate::core::ExecutionContext;
use crate::schema::Schema;

/// Executes documents against a schema
#[derive(Debug, Clone)]
pub struct Executor {
    schema: Arc<Schema>,
    config: ExecutorConfig,
}

impl Executor {
    /// Create a new executor with the default configuration
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_config(schema, ExecutorConfig::default())
    }

    pub fn with_config(schema: Arc<Schema>, config: ExecutorConfig) -> Self {
        Self { schema, config }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute a GraphQL document
    ///
    /// Never fails: parse, operation and field errors all end up in the
    /// returned result's error list.
    pub async fn execute(
        &self,
        query: &str,
        variables: Variables,
        context: &ExecutionContext,
    ) -> ExecutionResult {
        run(&self.schema, &self.config, query, &variables, context).await
    }
}

/// Execute a document against `schema` with the default configuration
pub async fn execute(
    schema: &Schema,
    query: &str,
    variables: Variables,
    context: &ExecutionContext,
) -> ExecutionResult {
    run(schema, &ExecutorConfig::default(), query, &variables, context).await
}

async fn run(
    schema: &Schema,
    config: &ExecutorConfig,
    query: &str,
    variables: &Variables,
    context: &ExecutionContext,
) -> ExecutionResult {
    let plan = match document::plan(query, variables, config.max_fields) {
        Ok(plan) => plan,
        Err(err) => {
            tracing::warn!(code = err.code(), error = %err, "rejected GraphQL document");
            return ExecutionResult::from_error(err);
        }
    };

    let scope = ExecutionScope {
        schema,
        context,
        config,
    };

    let outcomes = match plan.kind {
        OperationKind::Query => query_executor::execute_query(&scope, &plan.selection).await,
        OperationKind::Mutation => {
            match mutation_executor::execute_mutation(&scope, &plan.selection).await {
                Ok(outcomes) => outcomes,
                Err(err) => {
                    tracing::warn!(code = err.code(), error = %err, "rejected GraphQL mutation");
                    return ExecutionResult::from_error(err);
                }
            }
        }
    };

    assemble(outcomes)
}

fn assemble(outcomes: Vec<FieldOutcome>) -> ExecutionResult {
    let mut data = Map::new();
    let mut errors = Vec::new();

    for outcome in outcomes {
        if let Some(value) = outcome.value {
            data.insert(outcome.key, value);
        }
        errors.extend(outcome.errors);
    }

    tracing::debug!(fields = data.len(), errors = errors.len(), "execution finished");
    ExecutionResult { data, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExecutionError, FieldValue, Id, ScalarKind};
    use crate::schema::{ArgumentDefinition, FieldDefinition, ObjectTypeDefinition, TypeRef};
    use serde_json::json;

    // -----------------------------------------------------------------------
    // Shared test schema
    // -----------------------------------------------------------------------

    #[derive(Debug, Clone)]
    struct Order {
        id: Id,
        total_cents: i64,
    }

    crate::impl_graphql_object!(Order, "Order", [id, total_cents]);

    fn orders() -> Vec<Order> {
        (1..=3)
            .map(|n| Order {
                id: Id::from(n),
                total_cents: n * 100,
            })
            .collect()
    }

    fn test_schema() -> Arc<Schema> {
        let query = ObjectTypeDefinition::new("Query")
            .field(
                FieldDefinition::new("orders", TypeRef::list(TypeRef::object("Order")))
                    .with_argument(ArgumentDefinition::new("limit", ScalarKind::Int))
                    .resolve_with(|_| Ok(FieldValue::objects(orders()))),
            )
            .field(
                FieldDefinition::new("broken", TypeRef::scalar(ScalarKind::Int))
                    .resolve_with(|_| Err(anyhow::anyhow!("backend unavailable").into())),
            )
            .field(
                FieldDefinition::new("mislabeled", TypeRef::scalar(ScalarKind::Boolean))
                    .resolve_with(|_| Ok("yes".into())),
            );

        let mutation = ObjectTypeDefinition::new("Mutation").field(
            FieldDefinition::new("placeOrder", TypeRef::object("Order"))
                .with_argument(ArgumentDefinition::required("total_cents", ScalarKind::Int))
                .requires_flag("isAuthenticated")
                .resolve_with(|ctx| {
                    let total_cents = ctx.args.get_int("total_cents").unwrap_or_default();
                    Ok(FieldValue::object(Order {
                        id: Id::from(99),
                        total_cents,
                    }))
                }),
        );

        let order = ObjectTypeDefinition::new("Order")
            .field(FieldDefinition::new("id", TypeRef::scalar(ScalarKind::Id)))
            .field(
                FieldDefinition::new("total_cents", TypeRef::scalar(ScalarKind::Int))
                    .wire_name("totalCents"),
            );

        Arc::new(
            Schema::build(query)
                .mutation(mutation)
                .object(order)
                .finish()
                .expect("test schema should build"),
        )
    }

    fn executor() -> Executor {
        Executor::new(test_schema())
    }

    // -----------------------------------------------------------------------
    // core.rs tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_execute_valid_query_returns_data() {
        let result = executor()
            .execute("query { orders { id totalCents } }", Variables::new(), &ExecutionContext::new())
            .await;

        assert!(result.is_ok(), "unexpected errors: {:?}", result.errors);
        assert_eq!(
            result.to_json(),
            json!({
                "orders": [
                    {"id": "1", "totalCents": 100},
                    {"id": "2", "totalCents": 200},
                    {"id": "3", "totalCents": 300}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_response_keeps_request_order() {
        let result = executor()
            .execute(
                "{ orders(limit: 1) { totalCents __typename id } }",
                Variables::new(),
                &ExecutionContext::new(),
            )
            .await;

        let order = &result.get("orders").expect("orders")[0];
        let keys: Vec<_> = order.as_object().expect("object").keys().cloned().collect();
        assert_eq!(keys, vec!["totalCents", "__typename", "id"]);
        assert_eq!(order["__typename"], "Order");
    }

    #[tokio::test]
    async fn test_parse_error_is_reported_not_raised() {
        let result = executor()
            .execute("not valid graphql {{{{", Variables::new(), &ExecutionContext::new())
            .await;

        assert!(result.data.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code(), "PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_mutation_without_mutation_root() {
        let schema = Schema::build(
            ObjectTypeDefinition::new("Query").field(
                FieldDefinition::new("hello", TypeRef::scalar(ScalarKind::String))
                    .resolve_with(|_| Ok("world".into())),
            ),
        )
        .finish()
        .expect("schema");

        let result = execute(
            &schema,
            "mutation { hello }",
            Variables::new(),
            &ExecutionContext::new(),
        )
        .await;

        assert_eq!(result.errors[0].code(), "INVALID_OPERATION");
    }

    #[tokio::test]
    async fn test_resolver_failure_is_isolated() {
        let result = executor()
            .execute("{ broken orders(limit: 1) { id } }", Variables::new(), &ExecutionContext::new())
            .await;

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code(), "RESOLVER_ERROR");
        assert_eq!(result.errors[0].message, "backend unavailable");
        assert!(result.get("broken").is_none());
        assert_eq!(result.get("orders"), Some(&json!([{"id": "1"}])));
    }

    #[tokio::test]
    async fn test_output_type_mismatch_is_serialization_error() {
        let result = executor()
            .execute("{ mislabeled }", Variables::new(), &ExecutionContext::new())
            .await;

        assert_eq!(result.errors[0].code(), "SERIALIZATION_ERROR");
    }

    #[tokio::test]
    async fn test_nested_unknown_field_nulls_only_that_field() {
        let result = executor()
            .execute("{ orders(limit: 1) { id email } }", Variables::new(), &ExecutionContext::new())
            .await;

        assert_eq!(result.get("orders"), Some(&json!([{"id": "1", "email": null}])));
        assert_eq!(result.errors.len(), 1);
        let error = serde_json::to_value(&result.errors[0]).expect("serialize");
        assert_eq!(error["path"], json!(["orders", 0, "email"]));
        assert_eq!(error["extensions"]["code"], "UNKNOWN_FIELD");
    }

    #[tokio::test]
    async fn test_selection_shape_is_validated() {
        let missing = executor()
            .execute("{ orders }", Variables::new(), &ExecutionContext::new())
            .await;
        assert_eq!(missing.errors[0].code(), "INVALID_SELECTION");

        let extra = executor()
            .execute("{ orders { id { value } } }", Variables::new(), &ExecutionContext::new())
            .await;
        assert_eq!(extra.errors[0].code(), "INVALID_SELECTION");
    }

    #[tokio::test]
    async fn test_depth_limit() {
        let config = ExecutorConfig {
            max_depth: 1,
            ..ExecutorConfig::default()
        };
        let executor = Executor::with_config(test_schema(), config);

        let result = executor
            .execute("{ orders { id } }", Variables::new(), &ExecutionContext::new())
            .await;

        // The root field itself fits; its sub-fields do not
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors.iter().all(|e| e.code() == "DEPTH_LIMIT_EXCEEDED"));
    }

    #[tokio::test]
    async fn test_declared_flag_gates_mutation() {
        let executor = executor();
        let query = "mutation { placeOrder(total_cents: 450) { id totalCents } }";

        let denied = executor
            .execute(query, Variables::new(), &ExecutionContext::new())
            .await;
        assert_eq!(denied.errors[0].code(), "UNAUTHORIZED");
        assert!(denied.get("placeOrder").is_none());

        let allowed = executor
            .execute(
                query,
                Variables::new(),
                &ExecutionContext::new().with("isAuthenticated", true),
            )
            .await;
        assert_eq!(
            allowed.to_json(),
            json!({"placeOrder": {"id": "99", "totalCents": 450}})
        );
    }

    #[tokio::test]
    async fn test_sequential_configuration_matches_concurrent() {
        let query = "{ a: orders(limit: 2) { id } b: orders(limit: 1) { totalCents } }";
        let concurrent = executor()
            .execute(query, Variables::new(), &ExecutionContext::new())
            .await;

        let sequential = Executor::with_config(
            test_schema(),
            ExecutorConfig {
                concurrent_fields: false,
                ..ExecutorConfig::default()
            },
        )
        .execute(query, Variables::new(), &ExecutionContext::new())
        .await;

        assert_eq!(concurrent, sequential);
    }

    #[test]
    fn test_error_from_typed_anyhow() {
        let err: ExecutionError = anyhow::Error::from(ExecutionError::DepthLimit { max_depth: 2 }).into();
        assert_eq!(err.code(), "DEPTH_LIMIT_EXCEEDED");
    }
}
