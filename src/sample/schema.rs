//! Schema over the sample dataset

use std::sync::Arc;

use super::model::{Post, User};
use super::store::MockStore;
use crate::core::{ExecutionError, FieldValue, GraphQLObject, Id, ScalarKind};
use crate::schema::{ArgumentDefinition, FieldDefinition, ObjectTypeDefinition, Schema, TypeRef};

/// Context flag the sample mutations require
pub const AUTHENTICATED_FLAG: &str = "isAuthenticated";

/// Build the sample schema over `store`
pub fn build_schema(store: Arc<MockStore>) -> Result<Schema, ExecutionError> {
    Schema::build(query_type(&store))
        .mutation(mutation_type(&store))
        .object(user_type(&store))
        .object(post_type(&store))
        .finish()
}

/// The sample schema over the seeded dataset
pub fn sample_schema() -> Result<Schema, ExecutionError> {
    build_schema(Arc::new(MockStore::seeded()))
}

fn query_type(store: &Arc<MockStore>) -> ObjectTypeDefinition {
    let users_store = store.clone();
    let user_store = store.clone();
    let posts_store = store.clone();

    ObjectTypeDefinition::new("Query")
        .field(
            FieldDefinition::new("hello", TypeRef::scalar(ScalarKind::String))
                .resolve_with(|_| Ok("world".into())),
        )
        .field(
            FieldDefinition::new("is_admin", TypeRef::scalar(ScalarKind::Boolean))
                .wire_name("isAdmin")
                .resolve_with(|_| Ok(true.into())),
        )
        .field(
            FieldDefinition::new("users", TypeRef::list(TypeRef::object("User")))
                .describe("All users, optionally limited to the first `limit`")
                .with_argument(ArgumentDefinition::new("limit", ScalarKind::Int))
                .resolve_with(move |_| Ok(FieldValue::objects(users_store.users.clone()))),
        )
        .field(
            FieldDefinition::new("user", TypeRef::object("User"))
                .with_argument(ArgumentDefinition::required("id", ScalarKind::Id))
                .resolve_with(move |ctx| {
                    let user = ctx
                        .args
                        .get_id("id")
                        .and_then(|id| user_store.user(id))
                        .cloned();
                    Ok(user.map(FieldValue::object).unwrap_or(FieldValue::Null))
                }),
        )
        .field(
            FieldDefinition::new("posts", TypeRef::list(TypeRef::object("Post")))
                .with_argument(ArgumentDefinition::new("limit", ScalarKind::Int))
                .resolve_with(move |_| Ok(FieldValue::objects(posts_store.posts.clone()))),
        )
}

fn mutation_type(store: &Arc<MockStore>) -> ObjectTypeDefinition {
    let store = store.clone();

    ObjectTypeDefinition::new("Mutation")
        .field(
            FieldDefinition::new("create_user", TypeRef::object("User"))
                .wire_name("createUser")
                .with_argument(ArgumentDefinition::required("username", ScalarKind::String))
                .requires_flag(AUTHENTICATED_FLAG)
                .resolve_with(|ctx| {
                    let username = ctx.args.get_str("username").unwrap_or_default();
                    Ok(FieldValue::object(User::new(username)))
                }),
        )
        .field(
            FieldDefinition::new("create_post", TypeRef::object("Post"))
                .wire_name("createPost")
                .with_argument(ArgumentDefinition::required("title", ScalarKind::String))
                .with_argument(ArgumentDefinition::new("body", ScalarKind::String))
                .with_argument(ArgumentDefinition::required("authorId", ScalarKind::Id))
                .resolve_with(move |ctx| {
                    ctx.require_flag(AUTHENTICATED_FLAG)?;

                    let author_id = ctx.args.get_id("authorId").cloned().unwrap_or(Id::from(0));
                    if store.user(&author_id).is_none() {
                        return Err(ExecutionError::argument_type(
                            ctx.field_name(),
                            "authorId",
                            format!("no user with id '{}'", author_id),
                        ));
                    }

                    let title = ctx.args.get_str("title").unwrap_or_default();
                    let body = ctx.args.get_str("body").map(str::to_string);
                    Ok(FieldValue::object(Post::new(title, body, author_id)))
                }),
        )
}

fn user_type(store: &Arc<MockStore>) -> ObjectTypeDefinition {
    let store = store.clone();

    ObjectTypeDefinition::new("User")
        .field(FieldDefinition::new("id", TypeRef::scalar(ScalarKind::Id)))
        .field(FieldDefinition::new("username", TypeRef::scalar(ScalarKind::String)))
        .field(
            FieldDefinition::new("created_at", TypeRef::scalar(ScalarKind::DateTime))
                .wire_name("createdAt"),
        )
        .field(
            FieldDefinition::new("posts", TypeRef::list(TypeRef::object("Post")))
                .with_argument(ArgumentDefinition::new("limit", ScalarKind::Int))
                .resolve_with(move |ctx| {
                    let posts = parent_id(ctx.parent, "id")
                        .map(|id| store.posts_by(&id))
                        .unwrap_or_default();
                    Ok(FieldValue::objects(posts))
                }),
        )
}

fn post_type(store: &Arc<MockStore>) -> ObjectTypeDefinition {
    let store = store.clone();

    ObjectTypeDefinition::new("Post")
        .field(FieldDefinition::new("id", TypeRef::scalar(ScalarKind::Id)))
        .field(FieldDefinition::new("title", TypeRef::scalar(ScalarKind::String)))
        .field(FieldDefinition::new("body", TypeRef::scalar(ScalarKind::String)))
        .field(
            FieldDefinition::new("author_id", TypeRef::scalar(ScalarKind::Id))
                .wire_name("authorId"),
        )
        .field(
            FieldDefinition::new("published_at", TypeRef::scalar(ScalarKind::DateTime))
                .wire_name("publishedAt"),
        )
        .field(
            FieldDefinition::new("author", TypeRef::object("User")).resolve_with(move |ctx| {
                let author = parent_id(ctx.parent, "author_id")
                    .and_then(|id| store.user(&id).cloned());
                Ok(author.map(FieldValue::object).unwrap_or(FieldValue::Null))
            }),
        )
}

fn parent_id(parent: &dyn GraphQLObject, attribute: &str) -> Option<Id> {
    parent
        .get_field(attribute)
        .and_then(|value| value.as_id().cloned())
}
