//! Users Query Example
//!
//! Runs a fixed query against the sample dataset and prints the response:
//!
//! ```text
//! cargo run --example users_query
//! ```

use anyhow::Result;
use mockql::prelude::*;
use tracing_subscriber::EnvFilter;

const QUERY: &str = r#"
{
    users {
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

    let schema = sample_schema()?;
    let result = execute(&schema, QUERY, Variables::new(), &ExecutionContext::new()).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
