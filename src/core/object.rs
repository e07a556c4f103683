//! Object values and default field resolution

use std::fmt;

use super::field::FieldValue;

/// A value that can stand in for a GraphQL object
///
/// This is the structural record the executor reads from when a field has no
/// explicit resolver: the field's internal name is looked up with
/// [`get_field`](GraphQLObject::get_field). Implement it by hand or with
/// [`impl_graphql_object!`](crate::impl_graphql_object).
pub trait GraphQLObject: fmt::Debug + Send + Sync {
    /// Name of the object type this value belongs to (e.g. "User")
    fn type_name(&self) -> &str;

    /// Read an attribute by its internal (snake_case) name
    ///
    /// Returns `None` when the object has no such attribute.
    fn get_field(&self, name: &str) -> Option<FieldValue>;
}

/// Parent value for root fields
///
/// Root types have no backing record, so every attribute lookup misses.
#[derive(Debug, Clone)]
pub struct RootObject {
    type_name: String,
}

impl RootObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl GraphQLObject for RootObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn get_field(&self, _name: &str) -> Option<FieldValue> {
        None
    }
}
