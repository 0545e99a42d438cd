//! Integration tests for Ordergraph.
//!
//! These run against a live server backed by a seeded database and are
//! `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! ordergraph-cli seed
//! cargo run -p ordergraph-api &
//! cargo test -p ordergraph-integration-tests -- --ignored
//! ```
//!
//! `ORDERGRAPH_BASE_URL` overrides the server address
//! (default `http://localhost:5000`).

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("ORDERGRAPH_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Shared state for one test.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: base_url(),
        }
    }

    /// Absolute URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a GraphQL document and return the decoded response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn graphql(&self, query: &str) -> reqwest::Result<Value> {
        self.client
            .post(self.url("/graphql"))
            .json(&json!({ "query": query }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
