//! RPC gateway for Gnoland endpoints
//!
//! One logical request is served by walking the registry in priority order
//! and returning the first decoded answer. A failing endpoint is only
//! skipped here; flipping it down is left to bootstrap and the prober.

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::constants::rpc::{BLOCK_PATH, STATUS_PATH};
use crate::errors::{MonitorError, RpcError, SetupError};
use crate::health::registry::NodeRegistry;
use crate::health::types::{BlockResponse, NodeStatus, RpcEnvelope};

#[derive(Clone)]
pub struct RpcGateway {
    client: Client,
    registry: Arc<NodeRegistry>,
    request_timeout: Duration,
}

impl RpcGateway {
    pub fn new(registry: Arc<NodeRegistry>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            registry,
            request_timeout,
        })
    }

    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    /// Latest status from the first usable endpoint
    pub async fn fetch_status(&self) -> Result<NodeStatus, MonitorError> {
        self.failover(STATUS_PATH).await
    }

    /// Block at `height` from the first usable endpoint
    pub async fn fetch_block(&self, height: i64) -> Result<BlockResponse, MonitorError> {
        self.failover(&format!("{}?height={}", BLOCK_PATH, height))
            .await
    }

    /// Status of one specific endpoint, ignoring its health
    pub async fn fetch_status_from(&self, base_url: &str) -> Result<NodeStatus, RpcError> {
        self.get_json(base_url, STATUS_PATH).await
    }

    async fn failover<T: DeserializeOwned>(&self, path: &str) -> Result<T, MonitorError> {
        for endpoint in self.registry.endpoints() {
            if !endpoint.is_usable().await {
                continue;
            }

            match self.get_json(endpoint.url(), path).await {
                Ok(payload) => return Ok(payload),
                Err(e) => {
                    debug!(
                        "{} request {} failed on {}, trying next endpoint: {}",
                        self.registry.chain_name(),
                        path,
                        endpoint.url(),
                        e
                    );
                }
            }
        }

        Err(MonitorError::NoUsableEndpoint {
            chain: self.registry.chain_name().to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, base_url: &str, path: &str) -> Result<T, RpcError> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), path);

        timeout(self.request_timeout, self.request_json(&url))
            .await
            .map_err(|_| RpcError::Timeout { url: url.clone() })?
    }

    async fn request_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RpcError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RpcError::from_reqwest(url, e))?;

        if !response.status().is_success() {
            return Err(RpcError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let envelope: RpcEnvelope<T> = response.json().await.map_err(|e| RpcError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(envelope.result)
    }

    /// Pick the primary endpoint at chain startup
    ///
    /// Endpoints that don't answer, serve another chain, or are still
    /// catching up are marked down with the reason. The first one passing
    /// every check is marked healthy and its URL returned. When none pass the
    /// chain is flagged as having no usable nodes.
    pub async fn connect(&self, chain_id: &str) -> Result<String, SetupError> {
        let chain_name = self.registry.chain_name();

        for endpoint in self.registry.endpoints() {
            if endpoint.is_down().await {
                continue;
            }

            let status = match self.fetch_status_from(endpoint.url()).await {
                Ok(status) => status,
                Err(e) => {
                    let msg = format!("❌ could not get status for {}: {}", chain_name, e);
                    warn!("{}", msg);
                    endpoint.mark_down(msg).await;
                    continue;
                }
            };

            if status.node_info.network != chain_id {
                let msg = format!(
                    "chain id {} on {} does not match, expected {}",
                    status.node_info.network,
                    endpoint.url(),
                    chain_id
                );
                warn!("{}", msg);
                endpoint.mark_down(msg).await;
                continue;
            }

            if status.sync_info.catching_up {
                let msg = format!("🐢 node is not synced, skipping {}", endpoint.url());
                warn!("{}", msg);
                endpoint.mark_down_syncing(msg).await;
                continue;
            }

            endpoint.mark_healthy().await;
            self.registry.clear_no_nodes().await;
            info!("✅ {} connected to Gnoland node: {}", chain_name, endpoint.url());
            return Ok(endpoint.url().to_string());
        }

        let err = SetupError::NoNodes {
            chain_id: chain_id.to_string(),
        };
        self.registry.set_no_nodes(err.to_string()).await;
        Err(err)
    }
}
