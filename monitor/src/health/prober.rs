//! Periodic endpoint probing
//!
//! Every tick re-tests each endpoint in its own task, independent of request
//! traffic, and applies the health transition table to the registry.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::registry::{NodeEndpoint, NodeRegistry};
use crate::rpc::RpcGateway;

/// What one probe did to its endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Healthy,
    Recovered,
    Syncing,
    WentDown,
    StillDown,
}

pub struct HealthProber {
    gateway: RpcGateway,
    period: Duration,
}

impl HealthProber {
    pub fn new(gateway: RpcGateway, period: Duration) -> Self {
        Self { gateway, period }
    }

    fn registry(&self) -> &Arc<NodeRegistry> {
        self.gateway.registry()
    }

    /// Probe every endpoint concurrently, results in registry order
    pub async fn probe_all(&self) -> Vec<ProbeOutcome> {
        let tasks: Vec<_> = self
            .registry()
            .endpoints()
            .iter()
            .map(|endpoint| {
                let gateway = self.gateway.clone();
                let endpoint = endpoint.clone();
                tokio::spawn(async move { probe_endpoint(&gateway, &endpoint).await })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(tasks.len());
        for result in join_all(tasks).await {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => error!("Node probe task panicked: {}", e),
            }
        }
        outcomes
    }

    /// Probe on a fixed period until cancelled
    pub async fn run(self, cancel: CancellationToken) {
        let chain_name = self.registry().chain_name().to_string();
        info!("⚙️ {} starting node health probing every {:?}", chain_name, self.period);

        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("{} node health probing stopped", chain_name);
                    return;
                }
                _ = ticker.tick() => {
                    let outcomes = self.probe_all().await;
                    debug!("{} probed {} nodes: {:?}", chain_name, outcomes.len(), outcomes);
                }
            }
        }
    }
}

async fn probe_endpoint(gateway: &RpcGateway, endpoint: &NodeEndpoint) -> ProbeOutcome {
    let chain_name = gateway.registry().chain_name();

    let status = match gateway.fetch_status_from(endpoint.url()).await {
        Ok(status) => status,
        Err(e) => {
            let msg = format!("❌ {} node {} is down: {}", chain_name, endpoint.url(), e);
            if endpoint.record_probe_failure(msg.clone()).await {
                warn!("{}", msg);
                return ProbeOutcome::WentDown;
            }
            return ProbeOutcome::StillDown;
        }
    };

    if status.sync_info.catching_up {
        endpoint
            .record_probe_syncing(format!("🐢 {} node {} is syncing", chain_name, endpoint.url()))
            .await;
        return ProbeOutcome::Syncing;
    }

    let recovered = endpoint.record_probe_healthy().await;
    gateway.registry().clear_no_nodes().await;

    if recovered {
        info!("🟢 {} node {} is healthy", chain_name, endpoint.url());
        ProbeOutcome::Recovered
    } else {
        ProbeOutcome::Healthy
    }
}
