//! GraphQL executor module
//!
//! This module contains the executor that evaluates documents against a
//! [`Schema`](crate::schema::Schema).
//!
//! The executor is split into several sub-modules:
//! - `core`: Main executor orchestration
//! - `document`: Parsing and lowering of the requested operation
//! - `query_executor`: Query resolution logic
//! - `mutation_executor`: Mutation resolution logic
//! - `field_resolver`: Field resolution and value completion
//! - `result`: The execution result

mod core;
mod document;
mod field_resolver;
mod mutation_executor;
mod query_executor;
mod result;

pub use core::{Executor, execute};
pub use document::Variables;
pub use result::ExecutionResult;
