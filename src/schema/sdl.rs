//! SDL rendering for a built schema

use indexmap::IndexSet;

use super::Schema;
use super::definition::FieldDefinition;
use crate::core::ScalarKind;

pub(super) fn render(schema: &Schema) -> String {
    let registry = schema.registry();
    let mut sdl = String::new();

    for scalar in custom_scalars(schema) {
        sdl.push_str(&format!("scalar {}\n\n", scalar.name()));
    }

    for type_name in registry.type_names() {
        if let Some(description) = registry.type_description(type_name) {
            sdl.push_str(&format!("{}\n", quote(description)));
        }
        sdl.push_str(&format!("type {} {{\n", type_name));
        for field in registry.fields(type_name) {
            sdl.push_str(&render_field(field));
        }
        sdl.push_str("}\n\n");
    }

    sdl.push_str("schema {\n");
    sdl.push_str(&format!("  query: {}\n", schema.query_type()));
    if let Some(mutation) = schema.mutation_type() {
        sdl.push_str(&format!("  mutation: {}\n", mutation));
    }
    sdl.push_str("}\n");

    sdl
}

/// Non-builtin scalars referenced by any field or argument, in first-use order
fn custom_scalars(schema: &Schema) -> IndexSet<ScalarKind> {
    let registry = schema.registry();
    let mut scalars = IndexSet::new();

    for type_name in registry.type_names() {
        for field in registry.fields(type_name) {
            let kinds = field
                .field_type
                .scalar_kind()
                .into_iter()
                .chain(field.arguments.values().map(|arg| arg.kind));
            scalars.extend(kinds.filter(|kind| !kind.is_builtin()));
        }
    }

    scalars
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}

fn render_field(field: &FieldDefinition) -> String {
    let mut line = String::new();

    if let Some(description) = &field.description {
        line.push_str(&format!("  {}\n", quote(description)));
    }

    line.push_str("  ");
    line.push_str(&field.wire_name);

    if !field.arguments.is_empty() {
        let args: Vec<String> = field
            .arguments
            .values()
            .map(|arg| {
                let bang = if arg.required { "!" } else { "" };
                format!("{}: {}{}", arg.name, arg.kind, bang)
            })
            .collect();
        line.push_str(&format!("({})", args.join(", ")));
    }

    line.push_str(&format!(": {}\n", field.field_type));
    line
}

#[cfg(test)]
mod tests {
    use crate::core::ScalarKind;
    use crate::schema::{
        ArgumentDefinition, FieldDefinition, ObjectTypeDefinition, Schema, TypeRef,
    };

    #[test]
    fn test_render_sdl() {
        let schema = Schema::build(
            ObjectTypeDefinition::new("Query").field(
                FieldDefinition::new("users", TypeRef::list(TypeRef::object("User")))
                    .describe("All users")
                    .with_argument(ArgumentDefinition::new("limit", ScalarKind::Int)),
            ),
        )
        .object(
            ObjectTypeDefinition::new("User")
                .describe("A registered user")
                .field(
                    FieldDefinition::new("created_at", TypeRef::scalar(ScalarKind::DateTime))
                        .wire_name("createdAt"),
                ),
        )
        .finish()
        .unwrap();

        let expected = "scalar DateTime\n\n\
                        type Query {\n  \"All users\"\n  users(limit: Int): [User]\n}\n\n\
                        \"A registered user\"\ntype User {\n  createdAt: DateTime\n}\n\n\
                        schema {\n  query: Query\n}\n";
        assert_eq!(schema.sdl(), expected);
    }

    #[test]
    fn test_builtin_scalars_are_not_declared() {
        let schema = Schema::build(ObjectTypeDefinition::new("Query").field(
            FieldDefinition::new("hello", TypeRef::scalar(ScalarKind::String))
                .with_argument(ArgumentDefinition::new("since", ScalarKind::DateTime)),
        ))
        .finish()
        .unwrap();

        let sdl = schema.sdl();
        assert!(sdl.starts_with("scalar DateTime\n\n"));
        assert!(!sdl.contains("scalar String"));
    }
}
