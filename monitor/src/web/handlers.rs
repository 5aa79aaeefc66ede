// Status API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::debug;

use crate::dashboard::StatusSnapshot;
use crate::web::{ApiResponse, AppState, ServiceHealth};

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<()>>)>;

/// Latest snapshot of every chain
pub async fn get_all_status(State(state): State<AppState>) -> ApiResult<Vec<StatusSnapshot>> {
    Ok(Json(ApiResponse::success(state.publisher.latest().await)))
}

/// Latest snapshot of one chain
pub async fn get_chain_status(
    Path(chain_name): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<StatusSnapshot> {
    match state.publisher.latest_for(&chain_name).await {
        Some(snapshot) => Ok(Json(ApiResponse::success(snapshot))),
        None => {
            debug!("No snapshot yet for chain {}", chain_name);
            Err((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!(
                    "No status available for chain {}",
                    chain_name
                ))),
            ))
        }
    }
}

/// Liveness of the monitor itself
pub async fn get_service_health(State(state): State<AppState>) -> ApiResult<ServiceHealth> {
    let chains_reporting = state.publisher.latest().await.len();
    Ok(Json(ApiResponse::success(ServiceHealth {
        status: "ok".to_string(),
        chains_configured: state.config.chains.len(),
        chains_reporting,
    })))
}
