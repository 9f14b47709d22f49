//! Maintenance log model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::double_option;

/// A record of maintenance work actually performed, optionally linked to
/// the schedule that prompted it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    pub id: i32,
    pub equipment_id: i32,
    pub schedule_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    /// Kind of work performed (e.g. preventive, corrective, calibration)
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub log_type: String,
    pub performed_by: String,
    pub performed_at: i64,
    /// Duration in minutes
    pub duration: Option<i32>,
    pub status: String,
    /// Structured list of replaced parts
    pub parts_replaced: Option<serde_json::Value>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create maintenance log request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLog {
    /// Required, must reference an existing equipment row
    pub equipment_id: Option<i32>,
    /// Optional, must reference an existing schedule when supplied
    pub schedule_id: Option<i32>,
    /// Required, non-empty after trimming
    pub title: Option<String>,
    pub description: Option<String>,
    /// Required
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    /// Required
    pub performed_by: Option<String>,
    /// Required timestamp
    pub performed_at: Option<i64>,
    pub duration: Option<i32>,
    /// Defaults to completed
    pub status: Option<String>,
    pub parts_replaced: Option<serde_json::Value>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

/// Validated log fields ready for insertion
#[derive(Debug, Clone)]
pub struct NewLog {
    pub equipment_id: i32,
    pub schedule_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub log_type: String,
    pub performed_by: String,
    pub performed_at: i64,
    pub duration: Option<i32>,
    pub status: String,
    pub parts_replaced: Option<serde_json::Value>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

/// Update maintenance log request (partial)
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLog {
    pub equipment_id: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub schedule_id: Option<Option<i32>>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    pub performed_by: Option<String>,
    pub performed_at: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub duration: Option<Option<i32>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub parts_replaced: Option<Option<serde_json::Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cost: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Query parameters for listing maintenance logs
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogQuery {
    pub equipment_id: Option<i32>,
    pub schedule_id: Option<i32>,
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    pub status: Option<String>,
    pub performed_by: Option<String>,
    /// Substring search over title and description
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
    pub order: Option<String>,
}
