//! Resolver registry
//!
//! Maps `(type, field)` to a [`FieldDefinition`] and, through it, to the
//! resolver that produces the field's value. Lookups are by wire name, the
//! name a request selects.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashSet;

use super::arguments::Arguments;
use super::definition::FieldDefinition;
use crate::core::{ExecutionContext, ExecutionError, FieldValue, GraphQLObject};

/// Everything a resolver gets to see
#[derive(Clone, Copy)]
pub struct ResolverContext<'a> {
    /// The object the field is being resolved on (the root object for root fields)
    pub parent: &'a dyn GraphQLObject,
    /// Coerced arguments
    pub args: &'a Arguments,
    /// The per-call context bag
    pub context: &'a ExecutionContext,
    pub field: &'a FieldDefinition,
}

impl<'a> ResolverContext<'a> {
    pub fn field_name(&self) -> &'a str {
        &self.field.wire_name
    }

    /// Fail with an authorization error unless the context flag is `true`
    pub fn require_flag(&self, flag: &str) -> Result<(), ExecutionError> {
        self.context.require_flag(self.field_name(), flag)
    }
}

/// Produces the value of one field
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, ctx: ResolverContext<'_>) -> Result<FieldValue, ExecutionError>;
}

/// Adapter turning a synchronous closure into a [`Resolver`]
pub struct FnResolver<F> {
    f: F,
}

impl<F> FnResolver<F>
where
    F: Fn(ResolverContext<'_>) -> Result<FieldValue, ExecutionError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> Resolver for FnResolver<F>
where
    F: Fn(ResolverContext<'_>) -> Result<FieldValue, ExecutionError> + Send + Sync,
{
    async fn resolve(&self, ctx: ResolverContext<'_>) -> Result<FieldValue, ExecutionError> {
        (self.f)(ctx)
    }
}

#[derive(Debug, Default)]
struct TypeFields {
    description: Option<String>,
    fields: IndexMap<String, FieldDefinition>,
    internal_names: HashSet<String>,
}

/// Registry of fields per type, read-only once the schema is built
#[derive(Debug, Default)]
pub struct ResolverRegistry {
    types: IndexMap<String, TypeFields>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type with no fields yet
    pub fn add_type(&mut self, type_name: &str, description: Option<String>) {
        let entry = self.types.entry(type_name.to_string()).or_default();
        if description.is_some() {
            entry.description = description;
        }
    }

    pub fn type_description(&self, type_name: &str) -> Option<&str> {
        self.types
            .get(type_name)
            .and_then(|entry| entry.description.as_deref())
    }

    /// Register a field (and its resolver, if any) on a type
    ///
    /// Fails when the wire name or the internal name is already taken on
    /// that type.
    pub fn register(
        &mut self,
        type_name: &str,
        field: FieldDefinition,
    ) -> Result<(), ExecutionError> {
        let entry = self.types.entry(type_name.to_string()).or_default();

        if entry.fields.contains_key(&field.wire_name) || entry.internal_names.contains(&field.name)
        {
            return Err(ExecutionError::DuplicateField {
                type_name: type_name.to_string(),
                field_name: field.wire_name,
            });
        }

        entry.internal_names.insert(field.name.clone());
        entry.fields.insert(field.wire_name.clone(), field);
        Ok(())
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Fields of a type in registration order
    pub fn fields(&self, type_name: &str) -> impl Iterator<Item = &FieldDefinition> {
        self.types
            .get(type_name)
            .into_iter()
            .flat_map(|entry| entry.fields.values())
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDefinition> {
        self.types
            .get(type_name)
            .and_then(|entry| entry.fields.get(field_name))
    }

    /// Look up a field, failing with `UnknownField` when it is not registered
    pub fn lookup(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<&FieldDefinition, ExecutionError> {
        self.field(type_name, field_name)
            .ok_or_else(|| ExecutionError::unknown_field(type_name, field_name))
    }

    /// Resolve one field on `parent`
    ///
    /// Fields without a resolver read the like-named attribute off the
    /// parent; a missing attribute resolves to null.
    pub async fn resolve(
        &self,
        type_name: &str,
        field_name: &str,
        parent: &dyn GraphQLObject,
        args: &Arguments,
        context: &ExecutionContext,
    ) -> Result<FieldValue, ExecutionError> {
        let field = self.lookup(type_name, field_name)?;

        if let Some(flag) = &field.required_flag {
            context.require_flag(&field.wire_name, flag)?;
        }

        match &field.resolver {
            Some(resolver) => {
                resolver
                    .resolve(ResolverContext {
                        parent,
                        args,
                        context,
                        field,
                    })
                    .await
            }
            None => Ok(parent.get_field(&field.name).unwrap_or(FieldValue::Null)),
        }
    }
}
