//! Core module containing fundamental traits and types for the crate

pub mod context;
pub mod error;
pub mod field;
pub mod macros;
pub mod object;

pub use context::ExecutionContext;
pub use error::{ExecutionError, PathSegment, ResponseError};
pub use field::{FieldValue, Id, InputValue, ScalarKind};
pub use object::{GraphQLObject, RootObject};
