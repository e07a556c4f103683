//! Schema construction
//!
//! A [`Schema`] owns exactly one Query root, at most one Mutation root, and
//! any number of object types, all registered into one
//! [`ResolverRegistry`]. It is validated once by [`SchemaBuilder::finish`]
//! and immutable afterwards.

pub mod arguments;
pub mod definition;
pub mod registry;
mod sdl;

pub use arguments::{Arguments, LIMIT_ARGUMENT, coerce_arguments};
pub use definition::{ArgumentDefinition, FieldDefinition, ObjectTypeDefinition, TypeRef};
pub use registry::{FnResolver, Resolver, ResolverContext, ResolverRegistry};

use crate::core::ExecutionError;

/// An immutable, validated schema
#[derive(Debug)]
pub struct Schema {
    query_type: String,
    mutation_type: Option<String>,
    registry: ResolverRegistry,
}

impl Schema {
    /// Start building a schema around its Query root
    pub fn build(query: ObjectTypeDefinition) -> SchemaBuilder {
        SchemaBuilder {
            query,
            mutation: None,
            objects: Vec::new(),
        }
    }

    pub fn query_type(&self) -> &str {
        &self.query_type
    }

    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    /// Render the schema as GraphQL SDL
    pub fn sdl(&self) -> String {
        sdl::render(self)
    }
}

/// Builder collecting type definitions before validation
pub struct SchemaBuilder {
    query: ObjectTypeDefinition,
    mutation: Option<ObjectTypeDefinition>,
    objects: Vec<ObjectTypeDefinition>,
}

impl SchemaBuilder {
    pub fn mutation(mut self, mutation: ObjectTypeDefinition) -> Self {
        self.mutation = Some(mutation);
        self
    }

    /// Add a non-root object type
    pub fn object(mut self, object: ObjectTypeDefinition) -> Self {
        self.objects.push(object);
        self
    }

    /// Register every field and check that object references resolve
    pub fn finish(self) -> Result<Schema, ExecutionError> {
        let query_type = self.query.name.clone();
        let mutation_type = self.mutation.as_ref().map(|m| m.name.clone());

        let mut registry = ResolverRegistry::new();
        let types = std::iter::once(self.query)
            .chain(self.mutation)
            .chain(self.objects);

        for object in types {
            registry.add_type(&object.name, object.description);
            for field in object.fields {
                registry.register(&object.name, field)?;
            }
        }

        for type_name in registry.type_names() {
            for field in registry.fields(type_name) {
                if let Some(target) = field.field_type.object_name()
                    && !registry.contains_type(target)
                {
                    return Err(ExecutionError::UnknownType {
                        type_name: target.to_string(),
                        field_name: format!("{}.{}", type_name, field.wire_name),
                    });
                }
            }
        }

        tracing::debug!(
            query = %query_type,
            mutation = ?mutation_type,
            types = registry.type_names().count(),
            "schema built"
        );

        Ok(Schema {
            query_type,
            mutation_type,
            registry,
        })
    }
}
