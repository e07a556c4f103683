//! Fixed in-memory dataset

use chrono::{DateTime, Utc};

use super::model::{Post, User};
use crate::core::Id;

/// Read-only store holding the sample users and posts
#[derive(Debug, Clone)]
pub struct MockStore {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
}

impl MockStore {
    pub fn new(users: Vec<User>, posts: Vec<Post>) -> Self {
        Self { users, posts }
    }

    /// The fixed dataset: Bob and Jeff, and three posts between them
    pub fn seeded() -> Self {
        let users = vec![
            User {
                id: Id::from(1),
                username: "Bob".to_string(),
                created_at: timestamp(1_705_311_000),
            },
            User {
                id: Id::from(2),
                username: "Jeff".to_string(),
                created_at: timestamp(1_706_886_000),
            },
        ];

        let posts = vec![
            Post {
                id: Id::from(1),
                title: "Hello GraphQL".to_string(),
                body: Some("Queries, mutations and not much else.".to_string()),
                author_id: Id::from(1),
                published_at: timestamp(1_709_294_400),
            },
            Post {
                id: Id::from(2),
                title: "Resolvers all the way down".to_string(),
                body: None,
                author_id: Id::from(1),
                published_at: timestamp(1_709_467_200),
            },
            Post {
                id: Id::from(3),
                title: "Notes from Jeff".to_string(),
                body: Some("Short and sweet.".to_string()),
                author_id: Id::from(2),
                published_at: timestamp(1_712_052_000),
            },
        ];

        Self::new(users, posts)
    }

    pub fn user(&self, id: &Id) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }

    /// Posts by one author, in dataset order
    pub fn posts_by(&self, author_id: &Id) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|post| &post.author_id == author_id)
            .cloned()
            .collect()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::seeded()
    }
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
