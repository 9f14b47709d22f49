//! Work order model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::double_option;

/// A tracked service request for one equipment item, independent of the
/// recurring schedule mechanism.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: i32,
    pub equipment_id: i32,
    pub title: String,
    pub description: Option<String>,
    /// One of: low, medium, high, critical
    pub priority: String,
    /// One of: pending, in_progress, on_hold, completed, cancelled
    pub status: String,
    /// Kind of service requested (e.g. repair, inspection)
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub order_type: String,
    pub reported_by: Option<String>,
    pub assigned_to: Option<String>,
    pub scheduled_date: Option<i64>,
    pub completed_date: Option<i64>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create work order request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkOrder {
    /// Required, must reference an existing equipment row
    pub equipment_id: Option<i32>,
    /// Required, non-empty after trimming
    pub title: Option<String>,
    pub description: Option<String>,
    /// Defaults to medium
    pub priority: Option<String>,
    /// Defaults to pending
    pub status: Option<String>,
    /// Required
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub reported_by: Option<String>,
    pub assigned_to: Option<String>,
    pub scheduled_date: Option<i64>,
    pub completed_date: Option<i64>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub notes: Option<String>,
}

/// Validated work order fields ready for insertion
#[derive(Debug, Clone)]
pub struct NewWorkOrder {
    pub equipment_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub order_type: String,
    pub reported_by: Option<String>,
    pub assigned_to: Option<String>,
    pub scheduled_date: Option<i64>,
    pub completed_date: Option<i64>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub notes: Option<String>,
}

/// Update work order request (partial)
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkOrder {
    pub equipment_id: Option<i32>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub priority: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub reported_by: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub scheduled_date: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub completed_date: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub estimated_cost: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub actual_cost: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Query parameters for listing work orders
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkOrderQuery {
    pub equipment_id: Option<i32>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub assigned_to: Option<String>,
    /// Substring search over title and description
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
    pub order: Option<String>,
}
