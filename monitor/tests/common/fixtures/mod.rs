//! This module provides reusable test utilities:
//! - Mock Gnoland RPC servers
//! - Chain contexts wired to those servers
//! - Config directory builders

// Not every test binary uses every fixture
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_rpc;
pub mod test_chain;
pub mod test_config;

pub use mock_rpc::*;
pub use test_chain::*;
pub use test_config::TestConfigBuilder;
