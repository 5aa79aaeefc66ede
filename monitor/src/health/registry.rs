//! Ordered endpoint registry for one chain
//!
//! Endpoints keep the order they were configured in; the gateway tries them
//! first-listed first. Each endpoint guards its own state so the prober
//! tasks and the gateway never race on the same fields, and the chain-level
//! flags sit behind a separate lock.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::types::NodeHealth;

#[derive(Debug)]
struct EndpointState {
    health: NodeHealth,
    was_down: bool,
}

/// One RPC candidate and its guarded health state
#[derive(Debug)]
pub struct NodeEndpoint {
    url: String,
    state: RwLock<EndpointState>,
}

impl NodeEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: RwLock::new(EndpointState {
                health: NodeHealth::Healthy,
                was_down: false,
            }),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn health(&self) -> NodeHealth {
        self.state.read().await.health.clone()
    }

    pub async fn is_down(&self) -> bool {
        self.state.read().await.health.is_down()
    }

    pub async fn is_syncing(&self) -> bool {
        self.state.read().await.health.is_syncing()
    }

    pub async fn is_usable(&self) -> bool {
        self.state.read().await.health.is_usable()
    }

    pub async fn was_down(&self) -> bool {
        self.state.read().await.was_down
    }

    /// Reject the endpoint during bootstrap
    pub async fn mark_down(&self, reason: String) {
        let mut state = self.state.write().await;
        let syncing = state.health.is_syncing();
        state.health = Self::down_state(&state.health, reason, syncing);
    }

    /// Reject the endpoint during bootstrap because it is still catching up
    pub async fn mark_down_syncing(&self, reason: String) {
        let mut state = self.state.write().await;
        state.health = Self::down_state(&state.health, reason, true);
    }

    /// Accept the endpoint during bootstrap
    pub async fn mark_healthy(&self) {
        self.state.write().await.health = NodeHealth::Healthy;
    }

    /// Probe failed. Returns true when this flipped the endpoint down.
    pub async fn record_probe_failure(&self, reason: String) -> bool {
        let mut state = self.state.write().await;
        if state.health.is_down() {
            return false;
        }
        let syncing = state.health.is_syncing();
        state.health = NodeHealth::Down {
            since: Utc::now(),
            reason,
            syncing,
        };
        true
    }

    /// Probe answered but the node is catching up. A down endpoint stays down.
    pub async fn record_probe_syncing(&self, reason: String) {
        let mut state = self.state.write().await;
        state.health = match &state.health {
            NodeHealth::Down { since, .. } => NodeHealth::Down {
                since: *since,
                reason,
                syncing: true,
            },
            _ => NodeHealth::Syncing { reason },
        };
    }

    /// Probe answered and the node is in sync. Returns true on recovery from down.
    pub async fn record_probe_healthy(&self) -> bool {
        let mut state = self.state.write().await;
        let recovered = state.health.is_down();
        if recovered {
            state.was_down = true;
        }
        state.health = NodeHealth::Healthy;
        recovered
    }

    /// Read and clear the recovery marker
    pub async fn take_recovered(&self) -> bool {
        let mut state = self.state.write().await;
        std::mem::take(&mut state.was_down)
    }

    fn down_state(current: &NodeHealth, reason: String, syncing: bool) -> NodeHealth {
        let since = current.down_since().unwrap_or_else(Utc::now);
        NodeHealth::Down {
            since,
            reason,
            syncing,
        }
    }
}

#[derive(Debug, Default)]
struct ChainState {
    no_nodes: bool,
    last_error: String,
}

/// Ordered candidate list for one chain plus chain-wide availability flags
#[derive(Debug)]
pub struct NodeRegistry {
    chain_name: String,
    endpoints: Vec<Arc<NodeEndpoint>>,
    chain_state: Mutex<ChainState>,
}

impl NodeRegistry {
    pub fn new<I, S>(chain_name: impl Into<String>, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            chain_name: chain_name.into(),
            endpoints: urls
                .into_iter()
                .map(|url| Arc::new(NodeEndpoint::new(url)))
                .collect(),
            chain_state: Mutex::new(ChainState::default()),
        }
    }

    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }

    /// Endpoints in failover priority order
    pub fn endpoints(&self) -> &[Arc<NodeEndpoint>] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Endpoints that are neither down nor syncing
    pub async fn healthy_count(&self) -> usize {
        let mut healthy = 0;
        for endpoint in &self.endpoints {
            let health = endpoint.health().await;
            if !health.is_down() && !health.is_syncing() {
                healthy += 1;
            }
        }
        healthy
    }

    pub async fn no_nodes(&self) -> bool {
        self.chain_state.lock().await.no_nodes
    }

    pub async fn last_error(&self) -> String {
        self.chain_state.lock().await.last_error.clone()
    }

    pub async fn set_no_nodes(&self, error: String) {
        let mut state = self.chain_state.lock().await;
        warn!("❌ {}: {}", self.chain_name, error);
        state.no_nodes = true;
        state.last_error = error;
    }

    pub async fn clear_no_nodes(&self) {
        let mut state = self.chain_state.lock().await;
        if state.no_nodes {
            info!("🟢 {} has a usable endpoint again", self.chain_name);
        }
        state.no_nodes = false;
        state.last_error.clear();
    }

    /// URLs of endpoints that came back since the last call
    pub async fn take_recoveries(&self) -> Vec<String> {
        let mut recovered = Vec::new();
        for endpoint in &self.endpoints {
            if endpoint.take_recovered().await {
                recovered.push(endpoint.url().to_string());
            }
        }
        recovered
    }
}
