//! Sample dataset and schema
//!
//! A fixed set of users and posts with the queries and mutations that go
//! with them. Nothing is persisted: mutations build and return new values
//! without storing them.

pub mod model;
pub mod schema;
pub mod store;

pub use model::{Post, User};
pub use schema::{AUTHENTICATED_FLAG, build_schema, sample_schema};
pub use store::MockStore;
