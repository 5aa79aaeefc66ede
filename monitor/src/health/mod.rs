//! Endpoint health tracking
//!
//! This module holds the ordered node registry, the periodic prober that
//! keeps it current, and the Gnoland RPC payload types.

pub mod prober;
pub mod registry;
pub mod types;

pub use prober::{HealthProber, ProbeOutcome};
pub use registry::{NodeEndpoint, NodeRegistry};
pub use types::NodeHealth;
