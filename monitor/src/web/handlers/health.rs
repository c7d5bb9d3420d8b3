// Liveness and monitor status endpoints

use axum::{extract::State, response::Json};
use serde::Serialize;

use super::common::{ApiResponse, ApiResult};
use crate::monitor::MonitorReport;
use crate::web::AppState;

#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
}

/// Liveness probe; answers as long as the process is up
pub async fn get_liveness() -> Json<Liveness> {
    Json(Liveness { status: "ok" })
}

/// Latest report published by the monitor loop
pub async fn get_monitor_status(State(state): State<AppState>) -> ApiResult<MonitorReport> {
    let report = state.report.read().await.clone();
    Ok(Json(ApiResponse::success(report)))
}
