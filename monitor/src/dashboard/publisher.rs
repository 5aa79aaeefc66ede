use anyhow::{anyhow, Result};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::StatusSnapshot;
use crate::constants::dashboard::WEBHOOK_TIMEOUT_SECONDS;

/// Consumer side of the snapshot channel
///
/// Keeps the latest snapshot per chain for the status API and forwards each
/// one to the dashboard webhook when configured.
#[derive(Clone)]
pub struct DashboardPublisher {
    webhook_url: Option<String>,
    client: Client,
    latest: Arc<RwLock<HashMap<String, StatusSnapshot>>>,
}

impl DashboardPublisher {
    pub fn new(webhook_url: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client for dashboard: {}", e))?;

        Ok(Self {
            webhook_url: webhook_url.filter(|url| !url.is_empty()),
            client,
            latest: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Latest snapshot of every chain, sorted by chain name
    pub async fn latest(&self) -> Vec<StatusSnapshot> {
        let latest = self.latest.read().await;
        let mut snapshots: Vec<_> = latest.values().cloned().collect();
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        snapshots
    }

    pub async fn latest_for(&self, chain_name: &str) -> Option<StatusSnapshot> {
        self.latest.read().await.get(chain_name).cloned()
    }

    pub async fn handle(&self, snapshot: StatusSnapshot) {
        {
            let mut latest = self.latest.write().await;
            latest.insert(snapshot.name.clone(), snapshot.clone());
        }
        self.send_webhook(&snapshot).await;
    }

    /// Drain the snapshot channel until cancelled or every sender is gone
    pub async fn run(self, mut rx: mpsc::Receiver<StatusSnapshot>, cancel: CancellationToken) {
        info!("Dashboard publisher started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                received = rx.recv() => match received {
                    Some(snapshot) => self.handle(snapshot).await,
                    None => break,
                },
            }
        }
        info!("Dashboard publisher stopped");
    }

    async fn send_webhook(&self, snapshot: &StatusSnapshot) {
        let Some(url) = &self.webhook_url else {
            return;
        };

        match timeout(
            Duration::from_secs(WEBHOOK_TIMEOUT_SECONDS),
            self.client.post(url).json(snapshot).send(),
        )
        .await
        {
            Ok(Ok(response)) => {
                if response.status().is_success() {
                    debug!("Snapshot for {} delivered at height {}", snapshot.name, snapshot.height);
                } else {
                    warn!("Dashboard webhook returned status: {} for {}", response.status(), snapshot.name);
                }
            }
            Ok(Err(e)) => {
                warn!("Failed to deliver snapshot for {}: {}", snapshot.name, e);
            }
            Err(_) => {
                warn!("Dashboard webhook timeout for {}", snapshot.name);
            }
        }
    }
}
