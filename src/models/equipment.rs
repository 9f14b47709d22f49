//! Equipment model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::double_option;

/// Equipment record.
///
/// All date fields are Unix epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i32,
    /// Equipment name / designation
    pub name: String,
    pub model: Option<String>,
    /// Unique across non-null values
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    /// One of: operational, maintenance, out_of_service, retired
    pub status: String,
    pub purchase_date: Option<i64>,
    pub warranty_expiry: Option<i64>,
    pub last_maintenance: Option<i64>,
    pub next_maintenance: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create equipment request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    /// Required, non-empty after trimming
    pub name: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    /// Defaults to operational
    pub status: Option<String>,
    pub purchase_date: Option<i64>,
    pub warranty_expiry: Option<i64>,
    pub last_maintenance: Option<i64>,
    pub next_maintenance: Option<i64>,
    pub notes: Option<String>,
}

/// Validated equipment fields ready for insertion
#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub name: String,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub purchase_date: Option<i64>,
    pub warranty_expiry: Option<i64>,
    pub last_maintenance: Option<i64>,
    pub next_maintenance: Option<i64>,
    pub notes: Option<String>,
}

/// Update equipment request. Omitted fields are left untouched; an explicit
/// `null` clears a nullable field.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub serial_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub manufacturer: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub purchase_date: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub warranty_expiry: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub last_maintenance: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub next_maintenance: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Query parameters for listing equipment
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    /// Filter by exact status
    pub status: Option<String>,
    /// Filter by exact category
    pub category: Option<String>,
    /// Filter by exact location
    pub location: Option<String>,
    /// Substring search over name, model, manufacturer and serial number
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Sort field (camelCase), validated against an allow-list
    pub sort: Option<String>,
    /// "asc" or "desc" (default desc)
    pub order: Option<String>,
}
