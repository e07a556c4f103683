//! Macros for reducing boilerplate when exposing structs as GraphQL objects

/// Implement [`GraphQLObject`](crate::core::GraphQLObject) for a struct
///
/// Each listed attribute becomes readable by its internal name through
/// `get_field`. The attribute's type must convert into
/// [`FieldValue`](crate::core::FieldValue).
///
/// # Example
/// ```rust,ignore
/// #[derive(Debug, Clone)]
/// pub struct User {
///     pub id: Id,
///     pub username: String,
///     pub created_at: DateTime<Utc>,
/// }
///
/// impl_graphql_object!(User, "User", [id, username, created_at]);
/// ```
#[macro_export]
macro_rules! impl_graphql_object {
    ($type:ident, $type_name:expr, [$($field:ident),* $(,)?]) => {
        impl $crate::core::GraphQLObject for $type {
            fn type_name(&self) -> &str {
                $type_name
            }

            fn get_field(&self, name: &str) -> Option<$crate::core::FieldValue> {
                match name {
                    $(
                        stringify!($field) => {
                            Some($crate::core::FieldValue::from(self.$field.clone()))
                        }
                    )*
                    _ => None,
                }
            }
        }
    };
}
