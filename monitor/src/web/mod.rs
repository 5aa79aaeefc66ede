pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::dashboard::DashboardPublisher;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub publisher: DashboardPublisher,
}

impl AppState {
    pub fn new(config: Arc<Config>, publisher: DashboardPublisher) -> Self {
        Self { config, publisher }
    }
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Monitor process liveness summary
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    pub status: String,
    pub chains_configured: usize,
    pub chains_reporting: usize,
}
