//! Central repository for timeouts, intervals, and sizes used by the monitor
//!
//! Grouped by concern so the defaults used by config parsing and the
//! values baked into the engine stay in one place.

use std::time::Duration;

/// RPC request constants
pub mod rpc {
    use super::Duration;

    /// Timeout applied to every single-endpoint RPC request
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Status endpoint path
    pub const STATUS_PATH: &str = "/status";

    /// Block endpoint path
    pub const BLOCK_PATH: &str = "/block";
}

/// Periodic task cadence
pub mod intervals {
    /// Monitor loop tick in seconds
    pub const BLOCK_CHECK_SECONDS: u64 = 5;

    /// Health prober tick in seconds
    pub const NODE_PROBE_SECONDS: u64 = 60;
}

/// Liveness ledger sizes
pub mod ledger {
    /// Number of per-block outcome slots shown on the dashboard grid
    pub const WINDOW_SLOTS: usize = 512;

    /// Signing window used for the missed counter when a chain doesn't set one
    pub const DEFAULT_SIGNING_WINDOW: i64 = 100;
}

/// Dashboard hand-off constants
pub mod dashboard {
    /// Message type tag carried by every status snapshot
    pub const STATUS_MSG_TYPE: &str = "status";

    /// Default capacity of the snapshot channel
    pub const CHANNEL_CAPACITY: usize = 256;

    /// Webhook request timeout
    pub const WEBHOOK_TIMEOUT_SECONDS: u64 = 10;

    /// Moniker reported before the validator is known
    pub const UNKNOWN_MONIKER: &str = "Unknown";
}

/// Status API defaults
pub mod web {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8095;
}
