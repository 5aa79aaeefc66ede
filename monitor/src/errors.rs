//! Custom error types for the validator monitor
//!
//! Endpoint-local RPC failures, chain-level exhaustion, and bootstrap
//! failures are kept apart so callers can decide whether to fail over,
//! degrade, or give up on a chain.

use std::fmt;

/// Main error type for the monitoring engine
#[derive(Debug)]
pub enum MonitorError {
    /// A single endpoint failed to answer a request
    Rpc(RpcError),

    /// Every endpoint of a chain was skipped or failed
    NoUsableEndpoint { chain: String },

    /// Chain bootstrap failed
    Setup(SetupError),
}

/// Failure talking to one RPC endpoint
#[derive(Debug)]
pub enum RpcError {
    /// Connection or transport level failure
    Transport { url: String, reason: String },

    /// Request exceeded its timeout
    Timeout { url: String },

    /// Endpoint answered with a non-success status
    HttpStatus { url: String, status: u16 },

    /// Response body could not be decoded
    Decode { url: String, reason: String },
}

/// Chain bootstrap failure variants
#[derive(Debug)]
pub enum SetupError {
    /// No endpoint passed the connect checks
    NoNodes { chain_id: String },

    /// Chain type has no monitoring engine
    UnsupportedChain { chain_id: String },

    /// HTTP client could not be built
    Client { reason: String },
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Rpc(e) => write!(f, "RPC error: {}", e),
            MonitorError::NoUsableEndpoint { chain } => {
                write!(f, "no usable endpoint available for {}", chain)
            }
            MonitorError::Setup(e) => write!(f, "Setup error: {}", e),
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcError::Transport { url, reason } => {
                write!(f, "request to {} failed: {}", url, reason)
            }
            RpcError::Timeout { url } => write!(f, "request to {} timed out", url),
            RpcError::HttpStatus { url, status } => {
                write!(f, "{} returned HTTP {}", url, status)
            }
            RpcError::Decode { url, reason } => {
                write!(f, "invalid response from {}: {}", url, reason)
            }
        }
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::NoNodes { chain_id } => {
                write!(f, "no usable Gnoland endpoints available for {}", chain_id)
            }
            SetupError::UnsupportedChain { chain_id } => {
                write!(f, "chain {} is not a Gnoland chain", chain_id)
            }
            SetupError::Client { reason } => {
                write!(f, "failed to build RPC client: {}", reason)
            }
        }
    }
}

impl std::error::Error for MonitorError {}
impl std::error::Error for RpcError {}
impl std::error::Error for SetupError {}

impl From<RpcError> for MonitorError {
    fn from(err: RpcError) -> Self {
        MonitorError::Rpc(err)
    }
}

impl From<SetupError> for MonitorError {
    fn from(err: SetupError) -> Self {
        MonitorError::Setup(err)
    }
}

impl RpcError {
    /// Classify a reqwest failure for the given URL
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RpcError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_decode() {
            RpcError::Decode {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            RpcError::Transport {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}
