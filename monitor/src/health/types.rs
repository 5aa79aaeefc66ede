//! Health state types and Gnoland RPC response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health of a single RPC endpoint
///
/// `Down` carries the `syncing` flag because the bootstrap path rejects a
/// catching-up endpoint by marking it down and syncing at once, and a probe
/// of a down endpoint can report it catching up without bringing it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeHealth {
    Healthy,
    Syncing {
        reason: String,
    },
    Down {
        since: DateTime<Utc>,
        reason: String,
        syncing: bool,
    },
}

impl NodeHealth {
    pub fn is_down(&self) -> bool {
        matches!(self, NodeHealth::Down { .. })
    }

    pub fn is_syncing(&self) -> bool {
        match self {
            NodeHealth::Syncing { .. } => true,
            NodeHealth::Down { syncing, .. } => *syncing,
            NodeHealth::Healthy => false,
        }
    }

    /// Only endpoints that are neither down nor catching up take traffic
    pub fn is_usable(&self) -> bool {
        matches!(self, NodeHealth::Healthy)
    }

    pub fn down_since(&self) -> Option<DateTime<Utc>> {
        match self {
            NodeHealth::Down { since, .. } => Some(*since),
            _ => None,
        }
    }

    pub fn last_message(&self) -> &str {
        match self {
            NodeHealth::Healthy => "",
            NodeHealth::Syncing { reason } => reason,
            NodeHealth::Down { reason, .. } => reason,
        }
    }
}

/// Every Gnoland RPC answer wraps its payload in `result`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcEnvelope<T> {
    pub result: T,
}

/// `GET /status` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStatus {
    pub node_info: NodeInfo,
    pub sync_info: SyncInfo,
    #[serde(default)]
    pub validator_info: StatusValidatorInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInfo {
    pub network: String,
    #[serde(default)]
    pub moniker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncInfo {
    pub catching_up: bool,
    pub latest_block_height: String,
    #[serde(default)]
    pub latest_block_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusValidatorInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub pub_key: PubKey,
    #[serde(default)]
    pub voting_power: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "@type", default)]
    pub key_type: String,
    #[serde(default)]
    pub value: String,
}

impl NodeStatus {
    /// Latest height as reported by the node, `None` when it isn't a number
    pub fn latest_height(&self) -> Option<i64> {
        self.sync_info.latest_block_height.parse::<i64>().ok()
    }
}

/// `GET /block?height=H` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockResponse {
    pub block: Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    #[serde(default)]
    pub last_commit: LastCommit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockHeader {
    pub height: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastCommit {
    // Absent votes come back as null entries
    #[serde(default)]
    pub precommits: Vec<Option<Precommit>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Precommit {
    pub validator_address: String,
    #[serde(default)]
    pub signature: Option<String>,
}
