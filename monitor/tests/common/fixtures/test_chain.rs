//! Chain context builders wired to mock RPC servers

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use validator_monitor::chain::{ChainContext, ChainIdentity};
use validator_monitor::dashboard::{self, StatusSnapshot};
use validator_monitor::health::NodeRegistry;
use validator_monitor::rpc::RpcGateway;

pub const CHAIN_ID: &str = "test6";
pub const VALIDATOR: &str = "g1monitoredvalidator";

/// Short timeout so unreachable endpoints don't slow the suite down
pub const TEST_TIMEOUT: Duration = Duration::from_secs(2);

pub fn gateway_for(urls: &[&str]) -> RpcGateway {
    let registry = Arc::new(NodeRegistry::new("gno", urls.iter().copied()));
    RpcGateway::new(registry, TEST_TIMEOUT).expect("Failed to build gateway")
}

pub struct TestChain {
    pub context: Arc<ChainContext>,
    pub snapshots: mpsc::Receiver<StatusSnapshot>,
}

impl TestChain {
    pub fn new(urls: &[&str]) -> Self {
        Self::with_window(urls, 100)
    }

    pub fn with_window(urls: &[&str], signing_window: i64) -> Self {
        let identity = ChainIdentity {
            name: "gno".to_string(),
            chain_id: CHAIN_ID.to_string(),
            validator_address: VALIDATOR.to_string(),
            signing_window,
        };
        let (sender, snapshots) = dashboard::channel(64);
        let context = Arc::new(ChainContext::new(identity, gateway_for(urls), sender));
        Self { context, snapshots }
    }

    /// All snapshots emitted so far
    pub fn drain_snapshots(&mut self) -> Vec<StatusSnapshot> {
        let mut received = Vec::new();
        while let Ok(snapshot) = self.snapshots.try_recv() {
            received.push(snapshot);
        }
        received
    }
}
