//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors carry stable codes
//! - Error responses are properly formatted, with paths
//! - Error conversions keep their kind
//! - A failing field never takes its siblings down

use mockql::prelude::*;
use serde_json::json;
use std::sync::Arc;

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_field_error_codes() {
        assert_eq!(ExecutionError::unknown_field("User", "email").code(), "UNKNOWN_FIELD");
        assert_eq!(
            ExecutionError::argument_type("users", "limit", "must not be negative").code(),
            "ARGUMENT_TYPE_ERROR"
        );
        assert_eq!(
            ExecutionError::unauthorized("createUser", "missing flag").code(),
            "UNAUTHORIZED"
        );
    }

    #[test]
    fn test_document_error_codes() {
        let parse = ExecutionError::Parse {
            message: "unexpected end".to_string(),
        };
        let operation = ExecutionError::InvalidOperation {
            message: "no mutation type".to_string(),
        };
        assert_eq!(parse.code(), "PARSE_ERROR");
        assert_eq!(operation.code(), "INVALID_OPERATION");
        assert_eq!(ExecutionError::DepthLimit { max_depth: 3 }.code(), "DEPTH_LIMIT_EXCEEDED");
    }

    #[test]
    fn test_anyhow_conversion_keeps_typed_errors() {
        let typed: ExecutionError =
            anyhow::Error::new(ExecutionError::unauthorized("createPost", "nope")).into();
        assert_eq!(typed.code(), "UNAUTHORIZED");

        let untyped: ExecutionError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(untyped.code(), "RESOLVER_ERROR");
        assert_eq!(untyped.to_string(), "disk on fire");
    }
}

// =============================================================================
// Error Response Tests
// =============================================================================

mod error_response_tests {
    use super::*;

    #[test]
    fn test_error_response_has_code_message_and_path() {
        let response = ExecutionError::unknown_field("User", "email")
            .into_response(vec!["users".into(), 0.into(), "email".into()]);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message": "Cannot query field 'email' on type 'User'",
                "path": ["users", 0, "email"],
                "extensions": {"code": "UNKNOWN_FIELD"}
            })
        );
    }

    #[test]
    fn test_empty_path_is_omitted() {
        let response = ExecutionError::Parse {
            message: "bad".to_string(),
        }
        .into_response(Vec::new());

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("path").is_none());
    }
}

// =============================================================================
// Execution Error Tests
// =============================================================================

mod execution_error_tests {
    use super::*;

    async fn run(query: &str) -> ExecutionResult {
        let schema = sample_schema().unwrap();
        execute(&schema, query, Variables::new(), &ExecutionContext::new()).await
    }

    #[tokio::test]
    async fn test_unknown_field_keeps_siblings() {
        let result = run("{ hello nope }").await;

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code(), "UNKNOWN_FIELD");
        assert_eq!(result.get("hello"), Some(&json!("world")));
        assert!(result.get("nope").is_none());
    }

    #[tokio::test]
    async fn test_errors_take_precedence_when_reported() {
        let result = run("{ hello nope }").await;
        let reported = result.to_json();

        assert!(reported.get("errors").is_some());
        assert!(reported.get("hello").is_none());
    }

    #[tokio::test]
    async fn test_nested_unknown_field_is_null_with_path() {
        let result = run("{ users(limit: 1) { username email } }").await;

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, vec![
            PathSegment::from("users"),
            PathSegment::from(0),
            PathSegment::from("email"),
        ]);
        assert_eq!(
            result.get("users"),
            Some(&json!([{"username": "Bob", "email": null}]))
        );
    }

    #[tokio::test]
    async fn test_parse_error() {
        let result = run("{ users { id ").await;
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code(), "PARSE_ERROR");
        assert!(result.data.is_empty());
    }

    #[tokio::test]
    async fn test_subscriptions_are_rejected() {
        let result = run("subscription { hello }").await;
        assert_eq!(result.errors[0].code(), "INVALID_OPERATION");
    }

    #[tokio::test]
    async fn test_object_field_without_selection() {
        let result = run("{ users }").await;
        assert_eq!(result.errors[0].code(), "INVALID_SELECTION");
    }

    #[tokio::test]
    async fn test_scalar_field_with_selection() {
        let result = run("{ hello { length } }").await;
        assert_eq!(result.errors[0].code(), "INVALID_SELECTION");
    }

    #[tokio::test]
    async fn test_unknown_argument() {
        let result = run("{ users(first: 1) { id } }").await;
        assert_eq!(result.errors[0].code(), "ARGUMENT_TYPE_ERROR");
    }

    #[tokio::test]
    async fn test_depth_limit() {
        let schema = Arc::new(sample_schema().unwrap());
        let config = ExecutorConfig {
            max_depth: 2,
            ..ExecutorConfig::default()
        };
        let executor = Executor::with_config(schema, config);

        let result = executor
            .execute(
                "{ user(id: 1) { posts(limit: 1) { title } } }",
                Variables::new(),
                &ExecutionContext::new(),
            )
            .await;

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code(), "DEPTH_LIMIT_EXCEEDED");
        assert_eq!(result.get("user"), Some(&json!({"posts": [{"title": null}]})));
    }

    #[tokio::test]
    async fn test_conflicting_aliases_are_reported() {
        let result = run("{ a: hello a: isAdmin hello }").await;

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code(), "INVALID_SELECTION");
        assert_eq!(result.errors[0].path, vec![PathSegment::from("a")]);
        assert!(result.get("a").is_none());
        assert_eq!(result.get("hello"), Some(&json!("world")));
    }

    #[tokio::test]
    async fn test_nested_conflicting_aliases_are_null() {
        let result = run("{ user(id: 1) { name: username name: id } }").await;

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code(), "INVALID_SELECTION");
        assert_eq!(result.get("user"), Some(&json!({"name": null})));
    }

    #[tokio::test]
    async fn test_fragment_expansion_over_budget_is_rejected() {
        let mut query = String::from("{ users { ...F0 } }");
        for level in 0..30 {
            query.push_str(&format!(
                " fragment F{} on User {{ ...F{} ...F{} }}",
                level,
                level + 1,
                level + 1
            ));
        }
        query.push_str(" fragment F30 on User { id }");

        let result = run(&query).await;

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code(), "INVALID_OPERATION");
        assert!(result.data.is_empty());
    }
}
