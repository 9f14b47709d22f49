//! Maintenance schedule API endpoints, including the overdue/upcoming views

use axum::{extract::State, http::StatusCode};
use chrono::Utc;

use crate::{
    error::AppResult,
    models::schedule::{
        CreateSchedule, MaintenanceSchedule, OverdueQuery, ScheduleQuery, UpcomingQuery,
        UpdateSchedule,
    },
};

use super::{AuthenticatedUser, Json, Path, Query};

/// List maintenance schedules with filters, search and pagination
#[utoipa::path(
    get,
    path = "/maintenance-schedules",
    tag = "maintenance-schedules",
    security(("bearer_auth" = [])),
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Schedule list", body = Vec<MaintenanceSchedule>)
    )
)]
pub async fn list_schedules(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<Vec<MaintenanceSchedule>>> {
    let schedules = state.services.schedules.list(&query).await?;
    Ok(Json(schedules))
}

/// Active schedules strictly past due, most overdue first
#[utoipa::path(
    get,
    path = "/maintenance-schedules/overdue",
    tag = "maintenance-schedules",
    security(("bearer_auth" = [])),
    params(OverdueQuery),
    responses(
        (status = 200, description = "Overdue schedules", body = Vec<MaintenanceSchedule>)
    )
)]
pub async fn overdue_schedules(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Query(query): Query<OverdueQuery>,
) -> AppResult<Json<Vec<MaintenanceSchedule>>> {
    let now = Utc::now().timestamp_millis();
    let schedules = state.services.schedules.overdue(&query, now).await?;
    Ok(Json(schedules))
}

/// Active schedules falling due within the next 30 days
#[utoipa::path(
    get,
    path = "/maintenance-schedules/upcoming",
    tag = "maintenance-schedules",
    security(("bearer_auth" = [])),
    params(UpcomingQuery),
    responses(
        (status = 200, description = "Upcoming schedules", body = Vec<MaintenanceSchedule>)
    )
)]
pub async fn upcoming_schedules(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Query(query): Query<UpcomingQuery>,
) -> AppResult<Json<Vec<MaintenanceSchedule>>> {
    let now = Utc::now().timestamp_millis();
    let schedules = state.services.schedules.upcoming(&query, now).await?;
    Ok(Json(schedules))
}

/// Get maintenance schedule by ID
#[utoipa::path(
    get,
    path = "/maintenance-schedules/{id}",
    tag = "maintenance-schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule details", body = MaintenanceSchedule),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn get_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceSchedule>> {
    let schedule = state.services.schedules.get_by_id(id).await?;
    Ok(Json(schedule))
}

/// Create maintenance schedule
#[utoipa::path(
    post,
    path = "/maintenance-schedules",
    tag = "maintenance-schedules",
    security(("bearer_auth" = [])),
    request_body = CreateSchedule,
    responses(
        (status = 201, description = "Schedule created", body = MaintenanceSchedule),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced equipment not found")
    )
)]
pub async fn create_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Json(data): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<MaintenanceSchedule>)> {
    let schedule = state.services.schedules.create(data).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Update maintenance schedule (partial)
#[utoipa::path(
    put,
    path = "/maintenance-schedules/{id}",
    tag = "maintenance-schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = UpdateSchedule,
    responses(
        (status = 200, description = "Schedule updated", body = MaintenanceSchedule),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn update_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSchedule>,
) -> AppResult<Json<MaintenanceSchedule>> {
    let schedule = state.services.schedules.update(id, data).await?;
    Ok(Json(schedule))
}

/// Delete maintenance schedule
#[utoipa::path(
    delete,
    path = "/maintenance-schedules/{id}",
    tag = "maintenance-schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Deleted schedule", body = MaintenanceSchedule),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn delete_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceSchedule>> {
    let schedule = state.services.schedules.delete(id).await?;
    Ok(Json(schedule))
}
