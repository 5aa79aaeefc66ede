pub mod manager;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
pub use manager::ConfigManager;

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout_seconds: u64,
    #[serde(default = "default_block_check_interval")]
    pub block_check_interval_seconds: u64,
    #[serde(default = "default_node_probe_interval")]
    pub node_probe_interval_seconds: u64,
    #[serde(default = "default_true")]
    pub dashboard_enabled: bool,
    pub dashboard_webhook_url: Option<String>,
    #[serde(default = "default_channel_capacity")]
    pub dashboard_channel_capacity: usize,
    // Populated from individual chain config files
    #[serde(skip)]
    pub chains: HashMap<String, ChainConfig>,
}

/// One `<chain>.toml` file: the chain section plus its ordered node list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfigFile {
    pub chain: ChainConfig,
    #[serde(default)]
    pub nodes: Vec<NodeUrlConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: String,
    pub validator_address: String,
    #[serde(default = "default_signing_window")]
    pub signing_window: i64,
    #[serde(default = "default_true")]
    pub enabled: bool,
    // Filled from the top-level [[nodes]] array, first listed is tried first
    #[serde(skip)]
    pub nodes: Vec<NodeUrlConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeUrlConfig {
    pub url: String,
}

fn default_host() -> String {
    constants::web::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    constants::web::DEFAULT_PORT
}

fn default_rpc_timeout() -> u64 {
    constants::rpc::REQUEST_TIMEOUT.as_secs()
}

fn default_block_check_interval() -> u64 {
    constants::intervals::BLOCK_CHECK_SECONDS
}

fn default_node_probe_interval() -> u64 {
    constants::intervals::NODE_PROBE_SECONDS
}

fn default_channel_capacity() -> usize {
    constants::dashboard::CHANNEL_CAPACITY
}

fn default_signing_window() -> i64 {
    constants::ledger::DEFAULT_SIGNING_WINDOW
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            rpc_timeout_seconds: default_rpc_timeout(),
            block_check_interval_seconds: default_block_check_interval(),
            node_probe_interval_seconds: default_node_probe_interval(),
            dashboard_enabled: true,
            dashboard_webhook_url: None,
            dashboard_channel_capacity: default_channel_capacity(),
            chains: HashMap::new(),
        }
    }
}

impl ChainConfig {
    /// Check the fields the engine can't run without
    pub fn validate(&self) -> Result<(), String> {
        if self.chain_id.trim().is_empty() {
            return Err("chain_id must not be empty".to_string());
        }
        if self.validator_address.trim().is_empty() {
            return Err("validator_address must not be empty".to_string());
        }
        if self.signing_window <= 0 {
            return Err(format!(
                "signing_window must be positive, got {}",
                self.signing_window
            ));
        }
        if self.nodes.is_empty() {
            return Err("at least one [[nodes]] entry is required".to_string());
        }
        if let Some(node) = self.nodes.iter().find(|n| n.url.trim().is_empty()) {
            return Err(format!("node url must not be empty: {:?}", node));
        }
        Ok(())
    }
}
