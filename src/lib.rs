//! # mockql
//!
//! Typed GraphQL query and mutation execution over a resolver registry.
//!
//! ## Features
//!
//! - **Resolver Registry**: fields bound to async resolvers per type, validated once at schema build
//! - **Default Resolution**: fields without a resolver read the like-named attribute of their parent
//! - **Explicit Wire Names**: `created_at` is served as `createdAt` because the field says so
//! - **Partial Execution**: a failing field never takes its siblings down with it
//! - **List Slicing**: fields declaring `limit` are truncated to the first `limit` items
//! - **Flag Authorization**: mutations gated on a boolean context flag fail with a typed error
//! - **Sample Dataset**: users and posts, ready to query
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mockql::prelude::*;
//!
//! let schema = sample_schema()?;
//! let result = execute(
//!     &schema,
//!     "{ users(limit: 1) { id username createdAt } }",
//!     Variables::new(),
//!     &ExecutionContext::new(),
//! )
//! .await;
//!
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

pub mod config;
pub mod core;
pub mod executor;
pub mod sample;
pub mod schema;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ExecutionContext, ExecutionError, FieldValue, GraphQLObject, Id, InputValue, PathSegment,
        ResponseError, ScalarKind,
    };

    // === Macros ===
    pub use crate::impl_graphql_object;

    // === Schema ===
    pub use crate::schema::{
        ArgumentDefinition, Arguments, FieldDefinition, ObjectTypeDefinition, Resolver,
        ResolverContext, ResolverRegistry, Schema, SchemaBuilder, TypeRef,
    };

    // === Execution ===
    pub use crate::executor::{ExecutionResult, Executor, Variables, execute};

    // === Config ===
    pub use crate::config::ExecutorConfig;

    // === Sample ===
    pub use crate::sample::{AUTHENTICATED_FLAG, MockStore, Post, User, build_schema, sample_schema};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}
