//! Work order API endpoints

use axum::{extract::State, http::StatusCode};

use crate::{
    error::AppResult,
    models::work_order::{CreateWorkOrder, UpdateWorkOrder, WorkOrder, WorkOrderQuery},
};

use super::{AuthenticatedUser, Json, Path, Query};

/// List work orders with filters, search, sorting and pagination
#[utoipa::path(
    get,
    path = "/work-orders",
    tag = "work-orders",
    security(("bearer_auth" = [])),
    params(WorkOrderQuery),
    responses(
        (status = 200, description = "Work order list", body = Vec<WorkOrder>)
    )
)]
pub async fn list_work_orders(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Query(query): Query<WorkOrderQuery>,
) -> AppResult<Json<Vec<WorkOrder>>> {
    let orders = state.services.work_orders.list(&query).await?;
    Ok(Json(orders))
}

/// Get work order by ID
#[utoipa::path(
    get,
    path = "/work-orders/{id}",
    tag = "work-orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Work order ID")),
    responses(
        (status = 200, description = "Work order details", body = WorkOrder),
        (status = 404, description = "Work order not found")
    )
)]
pub async fn get_work_order(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<WorkOrder>> {
    let order = state.services.work_orders.get_by_id(id).await?;
    Ok(Json(order))
}

/// Create work order
#[utoipa::path(
    post,
    path = "/work-orders",
    tag = "work-orders",
    security(("bearer_auth" = [])),
    request_body = CreateWorkOrder,
    responses(
        (status = 201, description = "Work order created", body = WorkOrder),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced equipment not found")
    )
)]
pub async fn create_work_order(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Json(data): Json<CreateWorkOrder>,
) -> AppResult<(StatusCode, Json<WorkOrder>)> {
    let order = state.services.work_orders.create(data).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Update work order (partial)
#[utoipa::path(
    put,
    path = "/work-orders/{id}",
    tag = "work-orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Work order ID")),
    request_body = UpdateWorkOrder,
    responses(
        (status = 200, description = "Work order updated", body = WorkOrder),
        (status = 404, description = "Work order not found")
    )
)]
pub async fn update_work_order(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateWorkOrder>,
) -> AppResult<Json<WorkOrder>> {
    let order = state.services.work_orders.update(id, data).await?;
    Ok(Json(order))
}

/// Delete work order
#[utoipa::path(
    delete,
    path = "/work-orders/{id}",
    tag = "work-orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Work order ID")),
    responses(
        (status = 200, description = "Deleted work order", body = WorkOrder),
        (status = 404, description = "Work order not found")
    )
)]
pub async fn delete_work_order(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<WorkOrder>> {
    let order = state.services.work_orders.delete(id).await?;
    Ok(Json(order))
}
