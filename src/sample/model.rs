//! Sample object types

use chrono::{DateTime, Utc};

use crate::core::Id;
use crate::impl_graphql_object;

/// A user of the sample dataset
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A new user, with its id and creation time assigned now
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }
}

impl_graphql_object!(User, "User", [id, username, created_at]);

/// A post written by a [`User`]
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Id,
    pub title: String,
    pub body: Option<String>,
    pub author_id: Id,
    pub published_at: DateTime<Utc>,
}

impl Post {
    pub fn new(title: impl Into<String>, body: Option<String>, author_id: Id) -> Self {
        Self {
            id: Id::generate(),
            title: title.into(),
            body,
            author_id,
            published_at: Utc::now(),
        }
    }
}

impl_graphql_object!(Post, "Post", [id, title, body, author_id, published_at]);
