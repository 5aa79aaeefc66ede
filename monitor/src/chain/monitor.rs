use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::signing::{check_block, BlockOutcome};
use super::ChainContext;

/// Which branch one monitor tick took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Chain has no usable endpoint, nothing was attempted
    NoNodes,
    /// Validator info could not be loaded yet
    ValidatorPending,
    /// Status request failed on every endpoint
    StatusUnavailable,
    /// Endpoint reports it is catching up
    CatchingUp,
    /// Height did not advance, snapshot re-emitted
    NoNewBlock { height: i64 },
    /// New block checked and recorded
    Processed { height: i64, outcome: BlockOutcome },
}

/// Polls chain status and records the signing outcome of every new head
pub struct MonitorLoop {
    context: Arc<ChainContext>,
    period: Duration,
    last_processed_height: i64,
}

impl MonitorLoop {
    pub fn new(context: Arc<ChainContext>, period: Duration) -> Self {
        Self {
            context,
            period,
            last_processed_height: 0,
        }
    }

    pub fn last_processed_height(&self) -> i64 {
        self.last_processed_height
    }

    pub async fn tick(&mut self) -> TickOutcome {
        let context = &self.context;
        let identity = context.identity();

        if context.registry().no_nodes().await {
            return TickOutcome::NoNodes;
        }

        if !context.has_ledger().await {
            if let Err(e) = context.load_validator_info().await {
                warn!("❌ {} error loading validator info: {}", identity.name, e);
                return TickOutcome::ValidatorPending;
            }
        }

        let status = match context.gateway().fetch_status().await {
            Ok(status) => status,
            Err(e) => {
                warn!("❌ {} error getting status: {}", identity.name, e);
                return TickOutcome::StatusUnavailable;
            }
        };

        if status.sync_info.catching_up {
            debug!("{} status reports catching up, skipping block check", identity.name);
            return TickOutcome::CatchingUp;
        }

        let height = status.latest_height().unwrap_or_else(|| {
            warn!(
                "{} reported unparseable height {:?}",
                identity.name, status.sync_info.latest_block_height
            );
            0
        });

        if height <= self.last_processed_height {
            context.emit_snapshot(height).await;
            return TickOutcome::NoNewBlock { height };
        }

        info!("🧊 {} block {}", identity.chain_id, height);

        let outcome = check_block(
            context.gateway(),
            &identity.chain_id,
            &identity.validator_address,
            height,
        )
        .await;

        context.record_outcome(outcome).await;
        self.last_processed_height = height;
        context.emit_snapshot(height).await;

        TickOutcome::Processed { height, outcome }
    }

    /// Tick on a fixed period until cancelled
    pub async fn run(mut self, cancel: CancellationToken) {
        let chain_id = self.context.identity().chain_id.clone();
        info!("⚙️ {} starting Gnoland block monitoring", chain_id);

        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("{} block monitoring stopped", chain_id);
                    return;
                }
                _ = ticker.tick() => {
                    let outcome = self.tick().await;
                    debug!("{} monitor tick: {:?}", chain_id, outcome);
                }
            }
        }
    }
}
