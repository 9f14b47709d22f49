//! Dashboard statistics endpoint

use axum::extract::State;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::{AuthenticatedUser, Json};

/// Equipment counts grouped by status. All four statuses are always
/// present, defaulting to zero.
#[derive(Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct EquipmentByStatus {
    pub operational: i64,
    pub maintenance: i64,
    pub out_of_service: i64,
    pub retired: i64,
}

/// Aggregated dashboard statistics, computed as one point-in-time snapshot
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub equipment_by_status: EquipmentByStatus,
    pub total_equipment: i64,
    /// Active schedules due within the next 30 days
    pub upcoming_maintenance: i64,
    /// Active schedules strictly past due
    pub overdue_maintenance: i64,
    /// Logs created within the last 30 days
    pub recent_logs: i64,
    /// Work orders with status pending or in_progress
    pub active_work_orders: i64,
}

/// Aggregated dashboard statistics
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    let now = Utc::now().timestamp_millis();
    let stats = state.services.dashboard.stats(now).await?;
    Ok(Json(stats))
}
