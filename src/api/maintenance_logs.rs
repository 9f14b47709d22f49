//! Maintenance log API endpoints

use axum::{extract::State, http::StatusCode};

use crate::{
    error::AppResult,
    models::maintenance_log::{CreateLog, LogQuery, MaintenanceLog, UpdateLog},
};

use super::{AuthenticatedUser, Json, Path, Query};

/// List maintenance logs with filters, search, sorting and pagination
#[utoipa::path(
    get,
    path = "/maintenance-logs",
    tag = "maintenance-logs",
    security(("bearer_auth" = [])),
    params(LogQuery),
    responses(
        (status = 200, description = "Log list", body = Vec<MaintenanceLog>)
    )
)]
pub async fn list_logs(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Query(query): Query<LogQuery>,
) -> AppResult<Json<Vec<MaintenanceLog>>> {
    let logs = state.services.logs.list(&query).await?;
    Ok(Json(logs))
}

/// Get maintenance log by ID
#[utoipa::path(
    get,
    path = "/maintenance-logs/{id}",
    tag = "maintenance-logs",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Log ID")),
    responses(
        (status = 200, description = "Log details", body = MaintenanceLog),
        (status = 404, description = "Log not found")
    )
)]
pub async fn get_log(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceLog>> {
    let log = state.services.logs.get_by_id(id).await?;
    Ok(Json(log))
}

/// Create maintenance log
#[utoipa::path(
    post,
    path = "/maintenance-logs",
    tag = "maintenance-logs",
    security(("bearer_auth" = [])),
    request_body = CreateLog,
    responses(
        (status = 201, description = "Log created", body = MaintenanceLog),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced equipment or schedule not found")
    )
)]
pub async fn create_log(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Json(data): Json<CreateLog>,
) -> AppResult<(StatusCode, Json<MaintenanceLog>)> {
    let log = state.services.logs.create(data).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// Update maintenance log (partial)
#[utoipa::path(
    put,
    path = "/maintenance-logs/{id}",
    tag = "maintenance-logs",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Log ID")),
    request_body = UpdateLog,
    responses(
        (status = 200, description = "Log updated", body = MaintenanceLog),
        (status = 404, description = "Log not found")
    )
)]
pub async fn update_log(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLog>,
) -> AppResult<Json<MaintenanceLog>> {
    let log = state.services.logs.update(id, data).await?;
    Ok(Json(log))
}

/// Delete maintenance log
#[utoipa::path(
    delete,
    path = "/maintenance-logs/{id}",
    tag = "maintenance-logs",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Log ID")),
    responses(
        (status = 200, description = "Deleted log", body = MaintenanceLog),
        (status = 404, description = "Log not found")
    )
)]
pub async fn delete_log(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceLog>> {
    let log = state.services.logs.delete(id).await?;
    Ok(Json(log))
}
