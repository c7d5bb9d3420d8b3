//! Mock GraphQL server for testing status queries
//!
//! This simulates the node's daemonStatus endpoint without a running node.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const GRAPHQL_PATH: &str = "/graphql";

/// Mock status server that simulates node GraphQL responses
pub struct MockStatusServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockStatusServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    pub fn graphql_url(&self) -> String {
        format!("{}{}", self.base_url, GRAPHQL_PATH)
    }

    /// Mock a daemonStatus answer
    pub async fn mock_status(
        &self,
        sync_status: &str,
        highest_block: i64,
        highest_unvalidated_block: i64,
    ) {
        self.mock_body(200, daemon_status_body(sync_status, highest_block, highest_unvalidated_block))
            .await;
    }

    /// Mock a non-success HTTP status
    pub async fn mock_http_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mock a 200 answer whose body is not JSON
    pub async fn mock_invalid_body(&self) {
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>starting</html>"))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_body(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

pub fn daemon_status_body(
    sync_status: &str,
    highest_block: i64,
    highest_unvalidated_block: i64,
) -> Value {
    json!({
        "data": {
            "daemonStatus": {
                "syncStatus": sync_status,
                "uptimeSecs": 7200,
                "blockchainLength": highest_block,
                "highestBlockLengthReceived": highest_block,
                "highestUnvalidatedBlockLengthReceived": highest_unvalidated_block,
                "nextBlockProduction": {
                    "times": [{ "startTime": "1718035200000" }]
                }
            }
        }
    })
}
