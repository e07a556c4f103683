//! Create User Example
//!
//! Runs the `createUser` mutation twice: once without the authentication
//! flag, once with it.
//!
//! ```text
//! RUST_LOG=mockql=debug cargo run --example create_user
//! ```

use anyhow::Result;
use mockql::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const MUTATION: &str = r#"
mutation CreateUser($username: String!) {
    createUser(username: $username) {
        id
        username
        createdAt
    }
}
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let executor = Executor::new(Arc::new(sample_schema()?));

    let mut variables = Variables::new();
    variables.insert("username".to_string(), serde_json::json!("Alice"));

    println!("📭 Anonymous:");
    let anonymous = executor
        .execute(MUTATION, variables.clone(), &ExecutionContext::new())
        .await;
    println!("{}", serde_json::to_string_pretty(&anonymous)?);

    println!("🔑 Authenticated:");
    let context = ExecutionContext::new().with(AUTHENTICATED_FLAG, true);
    let authenticated = executor.execute(MUTATION, variables, &context).await;
    println!("{}", serde_json::to_string_pretty(&authenticated)?);

    Ok(())
}
