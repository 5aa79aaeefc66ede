//! Per-chain monitoring engine
//!
//! A chain is bootstrapped once (primary endpoint selection), then two
//! long-lived tasks run until cancelled: the block monitor loop and the
//! node health prober. Both share the chain context, whose mutable state is
//! the lock-guarded registry and ledger.

pub mod ledger;
pub mod monitor;
pub mod signing;

pub use ledger::{LivenessLedger, LivenessWindow, ValidatorInfo};
pub use monitor::{MonitorLoop, TickOutcome};
pub use signing::BlockOutcome;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::{ChainConfig, Config};
use crate::constants;
use crate::dashboard::{DashboardSender, StatusSnapshot};
use crate::errors::{MonitorError, SetupError};
use crate::health::{HealthProber, NodeRegistry};
use crate::rpc::RpcGateway;

/// Immutable per-chain settings
#[derive(Debug, Clone)]
pub struct ChainIdentity {
    pub name: String,
    pub chain_id: String,
    pub validator_address: String,
    pub signing_window: i64,
}

/// Only Gnoland chains have a monitoring engine here
pub fn is_gnoland_chain(chain_id: &str) -> bool {
    chain_id == "test6" || chain_id.contains("gno")
}

/// Shared state of one monitored chain
pub struct ChainContext {
    identity: ChainIdentity,
    gateway: RpcGateway,
    ledger: Mutex<Option<LivenessLedger>>,
    dashboard: DashboardSender,
}

impl ChainContext {
    pub fn new(identity: ChainIdentity, gateway: RpcGateway, dashboard: DashboardSender) -> Self {
        Self {
            identity,
            gateway,
            ledger: Mutex::new(None),
            dashboard,
        }
    }

    pub fn identity(&self) -> &ChainIdentity {
        &self.identity
    }

    pub fn gateway(&self) -> &RpcGateway {
        &self.gateway
    }

    pub fn registry(&self) -> &Arc<NodeRegistry> {
        self.gateway.registry()
    }

    /// Copy of the ledger, `None` until validator info has been loaded
    pub async fn ledger(&self) -> Option<LivenessLedger> {
        self.ledger.lock().await.clone()
    }

    /// Select the primary endpoint, reporting a degraded snapshot when none is usable
    pub async fn connect(&self) -> Result<String, SetupError> {
        match self.gateway.connect(&self.identity.chain_id).await {
            Ok(url) => Ok(url),
            Err(e) => {
                let snapshot = self.degraded_snapshot().await;
                self.dashboard.publish(snapshot);
                Err(e)
            }
        }
    }

    /// Populate validator info and the liveness window on first success
    pub async fn load_validator_info(&self) -> Result<(), MonitorError> {
        let status = self.gateway.fetch_status().await?;
        let address = &self.identity.validator_address;

        let moniker = if status.validator_info.address == *address
            && !status.node_info.moniker.is_empty()
        {
            status.node_info.moniker.clone()
        } else {
            address.clone()
        };

        let conspub = hex::decode(address.strip_prefix('g').unwrap_or(address)).unwrap_or_default();

        let mut ledger = self.ledger.lock().await;
        if ledger.is_none() {
            *ledger = Some(LivenessLedger::new(
                ValidatorInfo {
                    moniker: moniker.clone(),
                    bonded: true,
                    jailed: false,
                    tombstoned: false,
                    missed: 0,
                    window: self.identity.signing_window,
                    conspub,
                },
                constants::ledger::WINDOW_SLOTS,
            ));
            info!(
                "⚙️ Gnoland validator {} ({}) is being monitored",
                address, moniker
            );
        }
        Ok(())
    }

    pub(crate) async fn has_ledger(&self) -> bool {
        self.ledger.lock().await.is_some()
    }

    pub(crate) async fn record_outcome(&self, outcome: BlockOutcome) {
        if let Some(ledger) = self.ledger.lock().await.as_mut() {
            ledger.record_outcome(outcome);
        }
    }

    /// Assemble and hand off the current state at `height`
    pub(crate) async fn emit_snapshot(&self, height: i64) {
        let registry = self.registry();
        let healthy_nodes = registry.healthy_count().await;
        let last_error = registry.last_error().await;

        for url in registry.take_recoveries().await {
            info!("🟢 {} node {} is back in rotation", self.identity.name, url);
        }

        let snapshot = {
            let ledger = self.ledger.lock().await;
            let Some(ledger) = ledger.as_ref() else {
                return;
            };
            let validator = ledger.validator();
            StatusSnapshot {
                msg_type: constants::dashboard::STATUS_MSG_TYPE.to_string(),
                name: self.identity.name.clone(),
                chain_id: self.identity.chain_id.clone(),
                moniker: validator.moniker.clone(),
                bonded: validator.bonded,
                jailed: validator.jailed,
                tombstoned: validator.tombstoned,
                missed: validator.missed,
                window: validator.window,
                nodes: registry.len(),
                healthy_nodes,
                active_alerts: 0,
                height,
                last_error,
                blocks: ledger.window().to_vec(),
            }
        };

        self.dashboard.publish(snapshot);
    }

    async fn degraded_snapshot(&self) -> StatusSnapshot {
        let registry = self.registry();
        let blocks = match self.ledger.lock().await.as_ref() {
            Some(ledger) => ledger.window().to_vec(),
            None => LivenessWindow::new(constants::ledger::WINDOW_SLOTS).to_vec(),
        };

        StatusSnapshot {
            msg_type: constants::dashboard::STATUS_MSG_TYPE.to_string(),
            name: self.identity.name.clone(),
            chain_id: self.identity.chain_id.clone(),
            moniker: constants::dashboard::UNKNOWN_MONIKER.to_string(),
            bonded: false,
            jailed: false,
            tombstoned: false,
            missed: 0,
            window: 0,
            nodes: registry.len(),
            healthy_nodes: 0,
            active_alerts: 1,
            height: 0,
            last_error: registry.last_error().await,
            blocks,
        }
    }
}

/// Bootstrap one chain and spawn its monitor loop and health prober
///
/// A failed bootstrap is logged but not fatal: the prober keeps testing
/// the endpoints and the monitor loop resumes once one of them recovers.
pub async fn start_chain(
    name: &str,
    chain_config: &ChainConfig,
    config: &Config,
    dashboard: DashboardSender,
    cancel: CancellationToken,
) -> Result<Vec<JoinHandle<()>>, MonitorError> {
    if !is_gnoland_chain(&chain_config.chain_id) {
        return Err(SetupError::UnsupportedChain {
            chain_id: chain_config.chain_id.clone(),
        }
        .into());
    }

    let identity = ChainIdentity {
        name: name.to_string(),
        chain_id: chain_config.chain_id.clone(),
        validator_address: chain_config.validator_address.clone(),
        signing_window: chain_config.signing_window,
    };

    let registry = Arc::new(NodeRegistry::new(
        name,
        chain_config.nodes.iter().map(|node| node.url.clone()),
    ));
    let gateway = RpcGateway::new(registry, Duration::from_secs(config.rpc_timeout_seconds))
        .map_err(|e| MonitorError::Setup(SetupError::Client {
            reason: e.to_string(),
        }))?;
    let context = Arc::new(ChainContext::new(identity, gateway.clone(), dashboard));

    match context.connect().await {
        Ok(_) => {
            if let Err(e) = context.load_validator_info().await {
                warn!("{} validator info not available yet: {}", name, e);
            }
        }
        Err(e) => error!("❌ {} bootstrap failed: {}", name, e),
    }

    let prober = HealthProber::new(
        gateway,
        Duration::from_secs(config.node_probe_interval_seconds),
    );
    let monitor = MonitorLoop::new(
        context,
        Duration::from_secs(config.block_check_interval_seconds),
    );

    Ok(vec![
        tokio::spawn(prober.run(cancel.clone())),
        tokio::spawn(monitor.run(cancel)),
    ])
}
