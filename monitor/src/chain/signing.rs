//! Per-block signature detection
//!
//! Presence check only: a non-empty signature from the expected address
//! counts as signed. Signatures are not verified.

use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::health::types::BlockResponse;
use crate::rpc::RpcGateway;

/// Per-block result stored in the liveness window
///
/// Serialized as the integer codes the dashboard grid understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    Unknown,
    Missed,
    Signed,
}

impl BlockOutcome {
    pub fn code(self) -> i8 {
        match self {
            BlockOutcome::Unknown => -1,
            BlockOutcome::Missed => 0,
            BlockOutcome::Signed => 3,
        }
    }
}

impl Serialize for BlockOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.code())
    }
}

/// Signed when a precommit from `validator_address` carries a signature
pub fn detect_signature(block: &BlockResponse, validator_address: &str) -> BlockOutcome {
    let signed = block
        .block
        .last_commit
        .precommits
        .iter()
        .flatten()
        .any(|precommit| {
            precommit.validator_address == validator_address
                && precommit
                    .signature
                    .as_deref()
                    .is_some_and(|sig| !sig.is_empty())
        });

    if signed {
        BlockOutcome::Signed
    } else {
        BlockOutcome::Missed
    }
}

/// Fetch the block at `height` and classify it, `Unknown` when the fetch fails
pub async fn check_block(
    gateway: &RpcGateway,
    chain_id: &str,
    validator_address: &str,
    height: i64,
) -> BlockOutcome {
    let block = match gateway.fetch_block(height).await {
        Ok(block) => block,
        Err(e) => {
            warn!("❌ {} error getting block {}: {}", chain_id, height, e);
            return BlockOutcome::Unknown;
        }
    };

    debug!(
        "{} block {} has {} precommits, looking for validator {}",
        chain_id,
        height,
        block.block.last_commit.precommits.len(),
        validator_address
    );

    let outcome = detect_signature(&block, validator_address);
    match outcome {
        BlockOutcome::Signed => {
            debug!("✅ {} validator {} signed block {}", chain_id, validator_address, height)
        }
        _ => info!("❌ {} validator {} MISSED block {}", chain_id, validator_address, height),
    }
    outcome
}
