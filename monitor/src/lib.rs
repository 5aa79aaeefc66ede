pub mod chain;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod health;
pub mod rpc;
pub mod web;

// Re-export commonly used types
pub use chain::{start_chain, ChainContext, ChainIdentity, MonitorLoop, TickOutcome};
pub use config::{ChainConfig, Config, ConfigManager};
pub use dashboard::{DashboardPublisher, DashboardSender, StatusSnapshot};
pub use errors::{MonitorError, RpcError, SetupError};
pub use health::{HealthProber, NodeRegistry};
pub use rpc::RpcGateway;
