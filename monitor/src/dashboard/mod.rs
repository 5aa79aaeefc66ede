//! Status snapshots handed to the dashboard
//!
//! Producers never wait on the consumer: snapshots go through a bounded
//! channel with `try_send`, and a full channel drops the newest snapshot.

pub mod publisher;

pub use publisher::DashboardPublisher;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::chain::signing::BlockOutcome;

/// Point-in-time view of one chain for the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub msg_type: String,
    pub name: String,
    pub chain_id: String,
    pub moniker: String,
    pub bonded: bool,
    pub jailed: bool,
    pub tombstoned: bool,
    pub missed: i64,
    pub window: i64,
    pub nodes: usize,
    pub healthy_nodes: usize,
    pub active_alerts: u32,
    pub height: i64,
    pub last_error: String,
    pub blocks: Vec<BlockOutcome>,
}

/// Non-blocking producer side of the snapshot channel
#[derive(Debug, Clone)]
pub struct DashboardSender {
    tx: Option<mpsc::Sender<StatusSnapshot>>,
}

/// Create a bounded snapshot channel
pub fn channel(capacity: usize) -> (DashboardSender, mpsc::Receiver<StatusSnapshot>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (DashboardSender { tx: Some(tx) }, rx)
}

impl DashboardSender {
    /// Sender that discards everything, for when the dashboard is off
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Hand a snapshot off without waiting. Returns false if it was dropped.
    pub fn publish(&self, snapshot: StatusSnapshot) -> bool {
        let Some(tx) = &self.tx else {
            return false;
        };

        match tx.try_send(snapshot) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(snapshot)) => {
                warn!(
                    "Dashboard channel full, dropping snapshot for {} at height {}",
                    snapshot.name, snapshot.height
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(snapshot)) => {
                debug!("Dashboard consumer gone, dropping snapshot for {}", snapshot.name);
                false
            }
        }
    }
}
