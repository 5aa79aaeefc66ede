//! Mock Gnoland RPC server for testing node interactions
//!
//! This simulates `/status` and `/block` responses without requiring a real node.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Mock RPC server that simulates Gnoland node responses
pub struct MockRpcServer {
    pub server: MockServer,
    pub base_url: String,
}

pub fn status_body(network: &str, latest_block: i64, catching_up: bool) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": "",
        "result": {
            "node_info": {
                "network": network,
                "moniker": "test-node"
            },
            "sync_info": {
                "catching_up": catching_up,
                "latest_block_height": latest_block.to_string(),
                "latest_block_time": "2024-05-01T12:00:00Z"
            },
            "validator_info": {
                "address": "g1nodevalidator",
                "pub_key": {
                    "@type": "/tm.PubKeyEd25519",
                    "value": "AAAA"
                },
                "voting_power": "0"
            }
        }
    })
}

pub fn block_body(height: i64, precommits: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": "",
        "result": {
            "block_meta": {
                "header": { "height": height.to_string(), "time": "2024-05-01T12:00:00Z" }
            },
            "block": {
                "header": { "height": height.to_string(), "time": "2024-05-01T12:00:00Z" },
                "last_commit": { "precommits": precommits }
            }
        }
    })
}

impl MockRpcServer {
    /// Create a new mock RPC server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Mock healthy synced node
    pub async fn mock_healthy_synced(&self, network: &str, latest_block: i64) {
        self.mock_status_body(status_body(network, latest_block, false))
            .await;
    }

    /// Mock node that is catching up (syncing)
    pub async fn mock_catching_up(&self, network: &str, latest_block: i64) {
        self.mock_status_body(status_body(network, latest_block, true))
            .await;
    }

    /// Mock node that reports itself as the given validator
    pub async fn mock_validator_node(
        &self,
        network: &str,
        latest_block: i64,
        validator_address: &str,
        moniker: &str,
    ) {
        let mut body = status_body(network, latest_block, false);
        body["result"]["validator_info"]["address"] = json!(validator_address);
        body["result"]["node_info"]["moniker"] = json!(moniker);
        self.mock_status_body(body).await;
    }

    pub async fn mock_status_body(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock unhealthy node (server error on every path)
    pub async fn mock_unhealthy(&self) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }

    /// Mock node returning a body that isn't an RPC envelope
    pub async fn mock_invalid_json(&self) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Invalid JSON"))
            .mount(&self.server)
            .await;
    }

    /// Mock block at height with the given precommits
    pub async fn mock_block_at_height(&self, height: i64, precommits: Value) {
        Mock::given(method("GET"))
            .and(path("/block"))
            .and(query_param("height", height.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(block_body(height, precommits)))
            .mount(&self.server)
            .await;
    }

    /// Mock block at height that must be requested exactly `times` times
    pub async fn mock_block_expect(&self, height: i64, precommits: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path("/block"))
            .and(query_param("height", height.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(block_body(height, precommits)))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Mock block endpoint failing
    pub async fn mock_block_error(&self, status_code: u16) {
        Mock::given(method("GET"))
            .and(path("/block"))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    /// Drop all mounted responses
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// Number of requests this server has received
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

/// Precommit list containing a signature from `address`
pub fn signed_by(address: &str) -> Value {
    json!([
        { "validator_address": "g1othervalidator", "signature": "b3RoZXI=" },
        { "validator_address": address, "signature": "c2lnbmVk" }
    ])
}

/// Precommit list without `address`
pub fn not_signed() -> Value {
    json!([
        { "validator_address": "g1othervalidator", "signature": "b3RoZXI=" },
        null
    ])
}
